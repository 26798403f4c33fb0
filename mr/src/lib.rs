//! A small in-process map/reduce harness and the reduce step that turns
//! per-item rating groups into `(item, average rating)` pairs.
//!
//! ```
//! use mr::average::average_rating;
//! use mr::rating::Rating;
//!
//! let ratings = vec![Rating::new(1, 3, 2.0), Rating::new(2, 3, 4.0)];
//! assert_eq!(average_rating(3, Some(ratings)), (3, 3.0));
//! assert_eq!(average_rating::<Rating>(7, None), (7, 0.0));
//! ```

pub mod average;
pub mod coordinator;
pub mod group;
pub mod rating;
pub mod task;
pub mod worker;
