// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeSet;

/// The seat map of one showing, split into free and taken seats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatAvailability {
    /// Seat numbers nobody holds, ascending.
    pub available: Vec<i64>,
    /// Seat numbers with an active booking, ascending and deduplicated.
    pub booked: Vec<i64>,
}

impl SeatAvailability {
    /// The hall capacity this map was computed for.
    #[must_use]
    pub fn total_seats(&self) -> i64 {
        i64::try_from(self.available.len() + self.booked.len()).unwrap_or(i64::MAX)
    }
}

/// Computes which seats of a hall are still free.
///
/// Seats are numbered `1..=total_seats`. Booked seat numbers outside that
/// range are ignored, and duplicates are collapsed, so the result always
/// partitions the hall exactly. A non-positive capacity yields an empty map.
///
/// # Arguments
///
/// * `total_seats` - The hall capacity
/// * `booked` - Seat numbers held by active bookings, in any order
#[must_use]
pub fn compute_available_seats(total_seats: i64, booked: &[i64]) -> SeatAvailability {
    if total_seats <= 0 {
        return SeatAvailability {
            available: Vec::new(),
            booked: Vec::new(),
        };
    }

    let taken: BTreeSet<i64> = booked
        .iter()
        .copied()
        .filter(|seat| (1..=total_seats).contains(seat))
        .collect();

    let available: Vec<i64> = (1..=total_seats)
        .filter(|seat| !taken.contains(seat))
        .collect();

    SeatAvailability {
        available,
        booked: taken.into_iter().collect(),
    }
}
