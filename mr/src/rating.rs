/// One (user, product) observation.
#[derive(Debug, PartialEq, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Rating {
    pub user: i32,
    pub product: i32,
    pub rating: f64,
}

impl Rating {
    pub fn new(user: i32, product: i32, rating: f64) -> Rating {
        Rating {
            user,
            product,
            rating,
        }
    }
}

/// Anything that carries a numeric rating score.
pub trait Rated {
    fn rating(&self) -> f64;
}

impl Rated for Rating {
    fn rating(&self) -> f64 {
        self.rating
    }
}

impl Rated for f64 {
    fn rating(&self) -> f64 {
        *self
    }
}

impl<R: Rated + ?Sized> Rated for &R {
    fn rating(&self) -> f64 {
        (**self).rating()
    }
}
