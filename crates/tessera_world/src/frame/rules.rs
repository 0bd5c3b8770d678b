//! Dirt-seam override rules for stone-like materials.
//!
//! Stone, marble, snow and sand draw special seam frames where they meet
//! dirt. Rules are evaluated top to bottom and the first match wins. Later
//! rules are written assuming earlier ones did not match, so the order is
//! part of the behaviour.
//!
//! Several rules require a cardinal dirt neighbour while also requiring that
//! side not to be exposed. Dirt never connects to these materials, so those
//! rules cannot fire today; they are kept so the table stays complete if the
//! connection pairs ever change.

use super::dir::{B, BL, BR, L, R, T, TL, TR};
use super::Neighbourhood;

/// Frame index of atlas cell `(col, row)`.
const fn cell(col: u8, row: u8) -> u8 {
    col + row * 16
}

/// One override rule.
#[derive(Debug, Clone, Copy)]
pub struct OverrideRule {
    /// Exact set of exposed cardinal sides.
    pub exposed: u8,
    /// Neighbours that must be dirt.
    pub dirt: u8,
    /// Neighbours that must not be dirt.
    pub clean: u8,
    /// Neighbours that must connect to the tile.
    pub connect: u8,
    /// Candidate frames; one is picked per position.
    pub frames: &'static [u8],
}

impl OverrideRule {
    const fn new(exposed: u8, dirt: u8, frames: &'static [u8]) -> Self {
        Self { exposed, dirt, clean: 0, connect: 0, frames }
    }

    const fn clean(mut self, clean: u8) -> Self {
        self.clean = clean;
        self
    }

    const fn connect(mut self, connect: u8) -> Self {
        self.connect = connect;
        self
    }

    /// Returns true if the rule applies to `n`.
    #[inline]
    #[must_use]
    pub const fn matches(&self, n: &Neighbourhood) -> bool {
        n.exposed() == self.exposed
            && n.dirt & self.dirt == self.dirt
            && n.dirt & self.clean == 0
            && n.connect & self.connect == self.connect
    }
}

const NONE: u8 = 0;

/// The ordered rule table.
pub static OVERRIDE_RULES: [OverrideRule; 37] = [
    // Single exposed side with dirt opposite.
    OverrideRule::new(T, B, &[cell(13, 0), cell(14, 0), cell(15, 0)]),
    OverrideRule::new(B, T, &[cell(13, 1), cell(14, 1), cell(15, 1)]),
    OverrideRule::new(L, R, &[cell(13, 2), cell(14, 2), cell(15, 2)]),
    OverrideRule::new(R, L, &[cell(13, 3), cell(14, 3), cell(15, 3)]),
    // Single exposed side with dirt beside it.
    OverrideRule::new(L, B, &[cell(4, 6), cell(4, 7), cell(4, 8)]),
    OverrideRule::new(L, T, &[cell(4, 9), cell(4, 10), cell(4, 11)]),
    OverrideRule::new(R, B, &[cell(5, 6), cell(5, 7), cell(5, 8)]),
    OverrideRule::new(R, T, &[cell(5, 9), cell(5, 10), cell(5, 11)]),
    // Three exposed sides.
    OverrideRule::new(T | L | R, B, &[cell(6, 6), cell(6, 7), cell(6, 8)]),
    OverrideRule::new(B | L | R, T, &[cell(6, 9), cell(6, 10), cell(6, 11)]),
    OverrideRule::new(T | B | R, L, &[cell(1, 13), cell(2, 13), cell(3, 13)]),
    OverrideRule::new(T | B | L, R, &[cell(4, 13), cell(5, 13), cell(6, 13)]),
    // Two opposite exposed sides.
    OverrideRule::new(L | R, B, &[cell(7, 6), cell(7, 7), cell(7, 8)]).connect(T),
    OverrideRule::new(L | R, T, &[cell(7, 9), cell(7, 10), cell(7, 11)]).connect(B),
    OverrideRule::new(T | B, L, &[cell(1, 14), cell(2, 14), cell(3, 14)]).connect(R),
    OverrideRule::new(T | B, R, &[cell(4, 14), cell(5, 14), cell(6, 14)]).connect(L),
    OverrideRule::new(L | R, T | B, &[cell(6, 13), cell(6, 14), cell(6, 15)]),
    OverrideRule::new(T | B, L | R, &[cell(10, 11), cell(11, 11), cell(12, 11)]),
    // Fully enclosed, dirt on the cardinals.
    OverrideRule::new(NONE, T | B | L | R, &[cell(7, 11), cell(8, 11), cell(9, 11)]),
    OverrideRule::new(NONE, B, &[cell(9, 5), cell(10, 5), cell(11, 5)]).clean(T | L | R),
    OverrideRule::new(NONE, T, &[cell(9, 6), cell(10, 6), cell(11, 6)]).clean(B | L | R),
    OverrideRule::new(NONE, L, &[cell(9, 7), cell(9, 8), cell(9, 9)]).clean(T | B | R),
    OverrideRule::new(NONE, R, &[cell(8, 7), cell(8, 8), cell(8, 9)]).clean(T | B | L),
    OverrideRule::new(NONE, T | B, &[cell(9, 10), cell(10, 10), cell(11, 10)]).clean(L | R),
    OverrideRule::new(NONE, L | R, &[cell(10, 7), cell(10, 8), cell(10, 9)]).clean(T | B),
    OverrideRule::new(NONE, T | L | R, &[cell(11, 6), cell(11, 7), cell(11, 8)]).connect(B),
    OverrideRule::new(NONE, T | B | L, &[cell(12, 6), cell(12, 7), cell(12, 8)]).connect(R),
    OverrideRule::new(NONE, B | L | R, &[cell(11, 9), cell(11, 10), cell(11, 11)]).connect(T),
    OverrideRule::new(NONE, T | B | R, &[cell(12, 9), cell(12, 10), cell(12, 11)]).connect(L),
    // Fully enclosed, dirt only on the corners.
    OverrideRule::new(NONE, BR, &[cell(0, 5), cell(0, 7), cell(0, 9)]),
    OverrideRule::new(NONE, BL, &[cell(1, 5), cell(1, 7), cell(1, 9)]),
    OverrideRule::new(NONE, TL, &[cell(1, 6), cell(1, 8), cell(1, 10)]),
    OverrideRule::new(NONE, TR, &[cell(0, 6), cell(0, 8), cell(0, 10)]),
    OverrideRule::new(NONE, L | T, &[cell(2, 5), cell(2, 7), cell(2, 9)]),
    OverrideRule::new(NONE, R | T, &[cell(3, 5), cell(3, 7), cell(3, 9)]),
    OverrideRule::new(NONE, L | B, &[cell(2, 6), cell(2, 8), cell(2, 10)]),
    OverrideRule::new(NONE, R | B, &[cell(3, 6), cell(3, 8), cell(3, 10)]),
];

/// Returns the first matching rule for `n`.
#[must_use]
pub fn find_override(n: &Neighbourhood) -> Option<&'static OverrideRule> {
    OVERRIDE_RULES.iter().find(|rule| rule.matches(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hood(connect: u8, dirt: u8) -> Neighbourhood {
        Neighbourhood { connect, dirt }
    }

    #[test]
    fn test_every_rule_has_candidates() {
        for (i, rule) in OVERRIDE_RULES.iter().enumerate() {
            assert!(
                (2..=3).contains(&rule.frames.len()),
                "rule {i} must offer 2-3 frames"
            );
        }
    }

    #[test]
    fn test_exposure_must_match_exactly() {
        // Top exposed, dirt below: the first rule.
        let n = hood(B | L | R | BL | BR, B);
        assert_eq!(n.exposed(), T);
        let rule = find_override(&n).expect("rule");
        assert_eq!(rule.frames, &[13, 14, 15]);

        // Extra exposure on the left no longer matches rule one.
        let n = hood(B | R, B);
        let rule = find_override(&n).map(|r| r.frames);
        assert_ne!(rule, Some(&[13u8, 14, 15][..]));
    }

    #[test]
    fn test_corner_dirt_order() {
        // Bottom-right is checked before bottom-left.
        let n = hood(L | B | R | T, BR | BL);
        let rule = find_override(&n).expect("corner rule");
        assert_eq!(rule.frames, &[cell(0, 5), cell(0, 7), cell(0, 9)]);
    }

    #[test]
    fn test_clean_blocks_match() {
        // Enclosed with dirt below and on the left: the "only below" rule is
        // rejected by its clean mask.
        let n = hood(L | B | R | T, B | L);
        let rule = find_override(&n).expect("rule");
        assert_ne!(rule.frames, &[cell(9, 5), cell(10, 5), cell(11, 5)]);
    }

    #[test]
    fn test_no_dirt_no_override() {
        let n = hood(L | B | R | T | TL | TR | BL | BR, 0);
        assert!(find_override(&n).is_none());
    }
}
