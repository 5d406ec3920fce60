mod delay;
mod partition;
mod primes;
mod squares;
mod words;

pub use delay::{collect_delays, DelayUnit};
pub use partition::{min_of_partitions, MinUnit};
pub use primes::{filter_primes, is_prime, PrimalityUnit};
pub use squares::{sum_of_squares, SquareUnit};
pub use words::{count_words, total_word_count, WordCountUnit};
