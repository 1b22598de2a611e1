//! Motivational quotes for check-in reminders.

use rand::seq::SliceRandom;

const QUOTES: &[&str] = &[
    "The only way to do great work is to love what you do. - Steve Jobs",
    "Success is not final, failure is not fatal: it is the courage to continue that counts. - Winston Churchill",
    "The future depends on what you do today. - Mahatma Gandhi",
    "Don't watch the clock; do what it does. Keep going. - Sam Levenson",
    "It always seems impossible until it's done. - Nelson Mandela",
    "The way to get started is to quit talking and begin doing. - Walt Disney",
    "Believe you can and you're halfway there. - Theodore Roosevelt",
    "The mind is everything. What you think you become. - Buddha",
    "Life is 10% what happens to you and 90% how you react to it. - Charles R. Swindoll",
    "The best way to predict the future is to create it. - Peter Drucker",
    "Don't let yesterday take up too much of today. - Will Rogers",
    "You miss 100% of the shots you don't take. - Wayne Gretzky",
    "The journey of a thousand miles begins with one step. - Lao Tzu",
    "Every expert was once a beginner. - Robert T. Kiyosaki",
];

/// Picks a random quote from the pool.
pub fn random_quote() -> &'static str {
    QUOTES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(QUOTES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_is_not_empty() {
        assert!(!QUOTES.is_empty());
    }

    #[test]
    fn test_random_quote_comes_from_pool() {
        for _ in 0..20 {
            assert!(QUOTES.contains(&random_quote()));
        }
    }
}
