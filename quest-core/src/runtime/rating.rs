use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RatingError {
    #[error("no rating selected")]
    Unrated,
    #[error("rating {0} outside 1..={1}")]
    OutOfRange(u8, u8),
}

/// Star widget state: a committed value plus a hover preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarRating {
    max: u8,
    committed: u8,
    shown: u8,
}

impl StarRating {
    pub fn new(max: u8) -> Self {
        Self { max, committed: 0, shown: 0 }
    }

    pub fn max(&self) -> u8 {
        self.max
    }

    pub fn hover(&mut self, value: u8) -> Result<u8, RatingError> {
        self.check(value)?;
        self.shown = value;
        Ok(self.shown)
    }

    /// Pointer left the widget; the highlight falls back to the committed value.
    pub fn leave(&mut self) -> u8 {
        self.shown = self.committed;
        self.shown
    }

    pub fn commit(&mut self, value: u8) -> Result<u8, RatingError> {
        self.check(value)?;
        self.committed = value;
        self.shown = value;
        Ok(value)
    }

    pub fn committed(&self) -> u8 {
        self.committed
    }

    /// Number of highlighted stars.
    pub fn shown(&self) -> u8 {
        self.shown
    }

    pub fn submit(&self) -> Result<u8, RatingError> {
        if self.committed == 0 {
            return Err(RatingError::Unrated);
        }
        Ok(self.committed)
    }

    fn check(&self, value: u8) -> Result<(), RatingError> {
        if value == 0 || value > self.max {
            return Err(RatingError::OutOfRange(value, self.max));
        }
        Ok(())
    }
}

impl Default for StarRating {
    fn default() -> Self {
        Self::new(5)
    }
}
