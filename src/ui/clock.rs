//! Cached wall-clock fields and hour/minute edge detection

/// Which fields rolled over since the previous frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockEdges {
    pub hour_changed: bool,
    pub minute_changed: bool,
}

/// Time as the face shows it: 12-hour clock plus split digits
#[derive(Debug, Clone, Default)]
pub struct TimeState {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Hour tens/units, minute tens/units, second tens/units
    pub digits: [u8; 6],
    last_hour: Option<u8>,
    last_minute: Option<u8>,
}

impl TimeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in a fresh reading (hour 0-23, minute 0-59, second 0-60).
    ///
    /// The first reading only seeds the last-seen values and reports no
    /// edges. Out-of-range input is wrapped or clamped rather than refused.
    pub fn observe(&mut self, hour: u8, minute: u8, second: u8) -> ClockEdges {
        if hour > 23 || minute > 59 {
            log::warn!("clock reading out of range: {:02}:{:02}", hour, minute);
        }

        self.hour = match hour % 24 % 12 {
            0 => 12,
            h => h,
        };
        self.minute = minute.min(59);
        self.second = second;

        let mut edges = ClockEdges::default();
        match (self.last_hour, self.last_minute) {
            (Some(last_hour), Some(last_minute)) => {
                if self.hour != last_hour {
                    self.last_hour = Some(self.hour);
                    edges.hour_changed = true;
                    self.hour_changed();
                }
                if self.minute != last_minute {
                    self.last_minute = Some(self.minute);
                    edges.minute_changed = true;
                    self.minute_changed();
                }
            }
            _ => {
                self.last_hour = Some(self.hour);
                self.last_minute = Some(self.minute);
            }
        }

        // A leap second can report 60
        if self.second > 59 {
            self.second = 59;
        }

        self.split_digits();
        edges
    }

    fn hour_changed(&mut self) {
        self.digits[0] = self.hour / 10;
        self.digits[1] = self.hour % 10;
        log::debug!("hour rolled over to {}", self.hour);
    }

    fn minute_changed(&mut self) {
        log::trace!("minute rolled over to {}", self.minute);
    }

    fn split_digits(&mut self) {
        self.digits = [
            self.hour / 10,
            self.hour % 10,
            self.minute / 10,
            self.minute % 10,
            self.second / 10,
            self.second % 10,
        ];
    }

    /// Last hour seen, `None` before the first reading
    pub fn last_hour(&self) -> Option<u8> {
        self.last_hour
    }

    pub fn last_minute(&self) -> Option<u8> {
        self.last_minute
    }
}
