//! Rules module - match pattern detection
//!
//! A rule is anchored at a cell: it fires when the anchor's column and row
//! parities equal the rule's parity and every offset cell (relative to the
//! anchor) holds the rule's color. Offsets that fall off the board simply
//! fail the check.
//!
//! For each configured color eight triangle rules are generated: four
//! parity classes times two triangle orientations. Together they cover every
//! placement of a three-cell triangle on the staggered hex layout.

use crate::grid::Grid;
use crate::types::{Color, Coord, ExplodeElement, Pattern};

/// Rule templates as `(parity, offsets)`; instantiated once per color
const TRIPLE_TEMPLATES: [((i32, i32), [(i32, i32); 3]); 8] = [
    ((0, 0), [(0, 0), (1, 0), (1, 1)]),
    ((0, 1), [(0, 0), (1, 0), (1, 1)]),
    ((1, 0), [(0, 0), (1, 0), (0, 1)]),
    ((1, 1), [(0, 0), (1, 0), (0, 1)]),
    ((1, 0), [(0, 0), (1, -1), (1, 0)]),
    ((1, 1), [(0, 0), (1, -1), (1, 0)]),
    ((0, 0), [(0, 0), (0, 1), (1, 1)]),
    ((0, 1), [(0, 0), (0, 1), (1, 1)]),
];

/// Number of rules generated per color
pub const RULES_PER_COLOR: usize = TRIPLE_TEMPLATES.len();

/// A single match pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    priority: i32,
    color: Color,
    parity: (i32, i32),
    offsets: Vec<(i32, i32)>,
    pattern: Pattern,
}

impl Rule {
    pub fn new(
        priority: i32,
        color: Color,
        parity: (i32, i32),
        pattern: Pattern,
        offsets: Vec<(i32, i32)>,
    ) -> Self {
        Self {
            priority,
            color,
            parity,
            offsets,
            pattern,
        }
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn pattern(&self) -> Pattern {
        self.pattern
    }

    /// Check whether the rule fires at `anchor`
    pub fn check(&self, grid: &Grid, anchor: Coord) -> bool {
        if (anchor.x.rem_euclid(2), anchor.y.rem_euclid(2)) != self.parity {
            return false;
        }
        self.offsets
            .iter()
            .all(|&(dx, dy)| grid.color(anchor.offset(dx, dy)) == Some(self.color))
    }

    /// Empty every offset cell and return the cleared coordinates.
    ///
    /// Only meaningful after [`Rule::check`] succeeded at the same anchor.
    pub fn clean(&self, grid: &mut Grid, anchor: Coord) -> Vec<Coord> {
        self.offsets
            .iter()
            .map(|&(dx, dy)| {
                let coord = anchor.offset(dx, dy);
                grid.clear(coord);
                coord
            })
            .collect()
    }
}

/// Ordered collection of rules, evaluated by ascending priority
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Build from arbitrary rules; a stable sort keeps list order among equal priorities
    pub fn new(mut rules: Vec<Rule>) -> Self {
        rules.sort_by_key(Rule::priority);
        Self { rules }
    }

    /// The triangle rules for the first `colors` palette entries
    pub fn triples(colors: u8) -> Self {
        let rules = Color::palette(colors)
            .flat_map(|color| {
                TRIPLE_TEMPLATES.iter().map(move |&(parity, offsets)| {
                    Rule::new(0, color, parity, Pattern::Triple, offsets.to_vec())
                })
            })
            .collect();
        Self::new(rules)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// Scan the whole grid, clearing every match in place.
    ///
    /// Anchors are visited in scan order and, per anchor, rules in priority
    /// order. The first rule that fires at an anchor clears its cells before
    /// the next rule is tried, so later rules see the vacancies.
    pub fn resolve(&self, grid: &mut Grid) -> Vec<ExplodeElement> {
        let mut elements = Vec::new();
        let anchors: Vec<Coord> = grid.coords().collect();
        for anchor in anchors {
            for rule in &self.rules {
                if rule.check(grid, anchor) {
                    let positions = rule.clean(grid, anchor);
                    elements.push(ExplodeElement {
                        color: rule.color(),
                        pattern: rule.pattern(),
                        positions,
                    });
                }
            }
        }
        elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn triple(parity: (i32, i32), offsets: [(i32, i32); 3]) -> Rule {
        Rule::new(0, Color(0), parity, Pattern::Triple, offsets.to_vec())
    }

    #[test]
    fn test_rule_count_per_color() {
        assert_eq!(RULES_PER_COLOR, 8);
        assert_eq!(RuleSet::triples(2).len(), 2 * RULES_PER_COLOR);
        assert_eq!(RuleSet::triples(15).len(), 15 * RULES_PER_COLOR);

        let rules = RuleSet::triples(3);
        assert!(rules.iter().all(|rule| rule.pattern() == Pattern::Triple));
        for color in Color::palette(3) {
            assert_eq!(
                rules.iter().filter(|rule| rule.color() == color).count(),
                RULES_PER_COLOR
            );
        }
    }

    #[test]
    fn test_check_requires_parity() {
        let grid = Grid::from_fn(4, 4, |_| Cell::new(Color(0)));
        let rule = triple((0, 0), [(0, 0), (1, 0), (1, 1)]);

        assert!(rule.check(&grid, Coord::new(0, 0)));
        assert!(rule.check(&grid, Coord::new(2, 2)));
        assert!(!rule.check(&grid, Coord::new(1, 0)));
        assert!(!rule.check(&grid, Coord::new(0, 1)));
    }

    #[test]
    fn test_check_out_of_bounds_is_no_match() {
        let grid = Grid::from_fn(2, 2, |_| Cell::new(Color(0)));
        let rule = triple((1, 0), [(0, 0), (1, -1), (1, 0)]);

        // (1, 0) would need (2, -1) and (2, 0)
        assert!(!rule.check(&grid, Coord::new(1, 0)));
    }

    #[test]
    fn test_check_requires_rule_color() {
        let grid = Grid::from_columns(&[&[0, 0], &[0, 1]]);
        let rule = triple((0, 0), [(0, 0), (1, 0), (1, 1)]);
        assert!(!rule.check(&grid, Coord::new(0, 0)));

        let rule = triple((0, 0), [(0, 0), (0, 1), (1, 0)]);
        assert!(rule.check(&grid, Coord::new(0, 0)));
    }

    #[test]
    fn test_clean_empties_offsets() {
        let mut grid = Grid::from_fn(3, 3, |_| Cell::new(Color(0)));
        let rule = triple((1, 1), [(0, 0), (1, -1), (1, 0)]);
        let cleared = rule.clean(&mut grid, Coord::new(1, 1));

        assert_eq!(
            cleared,
            vec![Coord::new(1, 1), Coord::new(2, 0), Coord::new(2, 1)]
        );
        assert_eq!(grid.filled_count(), 6);
        assert!(grid.is_vacant(Coord::new(2, 0)));
    }

    #[test]
    fn test_resolve_reports_rule_color() {
        // Only (0,0), (1,0), (1,1) share a color.
        let mut grid = Grid::from_columns(&[&[1, 0, 1], &[1, 1, 1], &[0, 0, 1]]);
        let rules = RuleSet::triples(2);

        let elements = rules.resolve(&mut grid);

        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].color, Color(1));
        assert_eq!(elements[0].pattern, Pattern::Triple);
        assert_eq!(
            elements[0].positions,
            vec![Coord::new(0, 0), Coord::new(1, 0), Coord::new(1, 1)]
        );
        assert_eq!(grid.filled_count(), 6);
    }

    #[test]
    fn test_resolve_uniform_board_clears_overlaps_once() {
        // Rules at the same anchor see cells emptied by earlier rules, so no
        // coordinate is reported twice even though many triangles overlap.
        let mut grid = Grid::from_fn(4, 4, |_| Cell::new(Color(0)));
        let elements = RuleSet::triples(2).resolve(&mut grid);

        let mut all: Vec<Coord> = elements.iter().flat_map(|e| e.positions.clone()).collect();
        let total = all.len();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), total);
        assert!(total >= 3);
    }

    #[test]
    fn test_priority_orders_evaluation() {
        let low = Rule::new(5, Color(1), (0, 0), Pattern::Triple, vec![(0, 0)]);
        let high = Rule::new(-1, Color(0), (0, 0), Pattern::Triple, vec![(0, 0)]);
        let set = RuleSet::new(vec![low, high]);
        let colors: Vec<_> = set.iter().map(Rule::color).collect();
        assert_eq!(colors, vec![Color(0), Color(1)]);
    }
}
