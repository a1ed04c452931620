//! # RID Lists
//!
//! Parses the relative identifiers (RIDs) to query. The accepted syntax is a
//! comma-separated list where every entry is either:
//! * A single RID (e.g. `500`).
//! * An inclusive range (e.g. `1000-1200`).
//!
//! Order is kept and duplicates are allowed; a RID listed twice is queried twice.

use std::ops::Deref;
use std::str::FromStr;

use crate::error::RoastError;

/// Upper bound on queued RIDs, far beyond any real domain.
pub const MAX_RIDS: usize = 1 << 24;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RidList {
    rids: Vec<u32>,
}

impl RidList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_single(&mut self, rid: u32) {
        self.rids.push(rid);
    }

    /// Appends `start..=end` in ascending order.
    ///
    /// Fails instead of growing the list past [`MAX_RIDS`].
    pub fn add_range(&mut self, start: u32, end: u32) -> Result<(), RoastError> {
        if start > end {
            return Err(RoastError::BadRange { start, end });
        }
        let span: u64 = u64::from(end - start) + 1;
        if self.rids.len() as u64 + span > MAX_RIDS as u64 {
            return Err(RoastError::RangeTooLarge {
                start,
                end,
                limit: MAX_RIDS,
            });
        }
        self.rids.extend(start..=end);
        Ok(())
    }
}

impl Deref for RidList {
    type Target = [u32];

    fn deref(&self) -> &Self::Target {
        &self.rids
    }
}

impl From<Vec<u32>> for RidList {
    fn from(rids: Vec<u32>) -> Self {
        Self { rids }
    }
}

impl FromStr for RidList {
    type Err = RoastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut list = RidList::new();

        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            match part.split_once('-') {
                Some((start, end)) => list.add_range(parse_rid(start)?, parse_rid(end)?)?,
                None => list.add_single(parse_rid(part)?),
            }
        }

        if list.is_empty() {
            return Err(RoastError::EmptyRidList);
        }

        Ok(list)
    }
}

fn parse_rid(token: &str) -> Result<u32, RoastError> {
    let token = token.trim();
    token.parse::<u32>().map_err(|source| RoastError::InvalidRid {
        token: token.to_string(),
        source,
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_singles_and_ranges_in_order() {
        let list: RidList = "1000-1003,2500, 7".parse().unwrap();
        assert_eq!(&*list, &[1000, 1001, 1002, 1003, 2500, 7]);
    }

    #[test]
    fn keeps_duplicates() {
        let list: RidList = "5,5,4-5".parse().unwrap();
        assert_eq!(&*list, &[5, 5, 4, 5]);
    }

    #[test]
    fn single_element_range() {
        let list: RidList = "42-42".parse().unwrap();
        assert_eq!(&*list, &[42]);
    }

    #[test]
    fn range_touching_u32_max_does_not_overflow() {
        let list: RidList = "4294967294-4294967295".parse().unwrap();
        assert_eq!(&*list, &[u32::MAX - 1, u32::MAX]);
    }

    #[test]
    fn rejects_range_too_large_to_queue() {
        let err = "0-4294967295".parse::<RidList>().unwrap_err();
        assert!(matches!(
            err,
            RoastError::RangeTooLarge { start: 0, end: u32::MAX, limit: MAX_RIDS }
        ));
    }

    #[test]
    fn limit_counts_the_whole_list() {
        let at_limit = format!("1-{MAX_RIDS}");
        assert_eq!(at_limit.parse::<RidList>().unwrap().len(), MAX_RIDS);

        let over = format!("0,1-{MAX_RIDS}");
        assert!(matches!(
            over.parse::<RidList>(),
            Err(RoastError::RangeTooLarge { .. })
        ));
    }

    #[test]
    fn skips_empty_entries() {
        let list: RidList = ",1,,2,".parse().unwrap();
        assert_eq!(&*list, &[1, 2]);
    }

    #[test]
    fn rejects_reversed_range() {
        let err = "1200-1000".parse::<RidList>().unwrap_err();
        assert!(matches!(err, RoastError::BadRange { start: 1200, end: 1000 }));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            "12,abc".parse::<RidList>(),
            Err(RoastError::InvalidRid { .. })
        ));
        assert!(matches!(
            "4294967296".parse::<RidList>(),
            Err(RoastError::InvalidRid { .. })
        ));
        assert!(matches!(
            "1-".parse::<RidList>(),
            Err(RoastError::InvalidRid { .. })
        ));
    }

    #[test]
    fn rejects_empty_list() {
        assert!(matches!(
            " , ".parse::<RidList>(),
            Err(RoastError::EmptyRidList)
        ));
    }
}
