use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// Day of the week, numbered from Sunday (0) to Saturday (6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Maps a 0-based index (0 = Sunday) to a weekday
    pub fn from_index(index: i32) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }

    /// Returns the 0-based index, 0 for Sunday
    pub const fn index(self) -> i32 {
        self as i32
    }

    /// Saturday and Sunday
    pub const fn is_weekend(self) -> bool {
        matches!(self, Self::Saturday | Self::Sunday)
    }
}

/// Text layout used when rendering a `CalendarDate`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
pub enum DateFormat {
    /// `YYYY-MM-DD`
    #[default]
    #[display(fmt = "extended")]
    Extended,
    /// `YYYYMMDD`
    #[display(fmt = "basic")]
    Basic,
}
