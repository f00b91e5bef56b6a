/// Responsive breakpoints for the explorer layout.
///
/// Single source of truth for width thresholds - no magic numbers scattered in render code.
use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    /// < 60 cols: charts stacked, no legends
    Compact,
    /// 60-99 cols: charts stacked
    Normal,
    /// 100-139 cols: SED beside the tabbed view
    Wide,
    /// 140+ cols: side by side with roomier labels
    UltraWide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=59 => Breakpoint::Compact,
            60..=99 => Breakpoint::Normal,
            100..=139 => Breakpoint::Wide,
            _ => Breakpoint::UltraWide,
        }
    }

    /// Check if at least this breakpoint (inclusive)
    pub fn at_least(&self, min: Breakpoint) -> bool {
        self.ordinal() >= min.ordinal()
    }

    fn ordinal(&self) -> u8 {
        match self {
            Breakpoint::Compact => 0,
            Breakpoint::Normal => 1,
            Breakpoint::Wide => 2,
            Breakpoint::UltraWide => 3,
        }
    }

    /// Legends need a few columns of their own
    pub fn shows_legend(&self) -> bool {
        self.at_least(Breakpoint::Normal)
    }
}

/// Split the main area into the SED pane and the tabbed pane.
///
/// Wide terminals put them side by side, narrower ones stack them.
pub fn chart_panes(area: Rect) -> (Rect, Rect) {
    let bp = Breakpoint::from_width(area.width);
    let (direction, constraints) = if bp.at_least(Breakpoint::Wide) {
        (
            Direction::Horizontal,
            [Constraint::Percentage(45), Constraint::Percentage(55)],
        )
    } else {
        (
            Direction::Vertical,
            [Constraint::Percentage(45), Constraint::Percentage(55)],
        )
    };
    let chunks = Layout::default()
        .direction(direction)
        .constraints(constraints)
        .split(area);
    (chunks[0], chunks[1])
}

/// Cells of a `columns`-wide grid holding `count` subplots, row-major
pub fn grid_cells(area: Rect, count: usize, columns: usize) -> Vec<Rect> {
    let columns = columns.max(1);
    let rows = count.div_ceil(columns).max(1);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(area);

    row_areas
        .iter()
        .flat_map(|row| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
                .split(*row)
                .to_vec()
        })
        .take(count)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_thresholds() {
        assert_eq!(Breakpoint::from_width(40), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(59), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(60), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(99), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(100), Breakpoint::Wide);
        assert_eq!(Breakpoint::from_width(139), Breakpoint::Wide);
        assert_eq!(Breakpoint::from_width(140), Breakpoint::UltraWide);
    }

    #[test]
    fn at_least_comparisons() {
        let wide = Breakpoint::Wide;
        assert!(wide.at_least(Breakpoint::Compact));
        assert!(wide.at_least(Breakpoint::Normal));
        assert!(wide.at_least(Breakpoint::Wide));
        assert!(!wide.at_least(Breakpoint::UltraWide));
        assert!(!Breakpoint::Compact.shows_legend());
    }

    #[test]
    fn panes_stack_on_narrow_terminals() {
        let (sed, tabs) = chart_panes(Rect::new(0, 0, 80, 40));
        assert_eq!(sed.x, tabs.x);
        assert!(tabs.y > sed.y);

        let (sed, tabs) = chart_panes(Rect::new(0, 0, 160, 40));
        assert_eq!(sed.y, tabs.y);
        assert!(tabs.x > sed.x);
    }

    #[test]
    fn grid_is_row_major() {
        let cells = grid_cells(Rect::new(0, 0, 90, 30), 9, 3);
        assert_eq!(cells.len(), 9);
        assert_eq!(cells[0], Rect::new(0, 0, 30, 10));
        assert_eq!(cells[1].x, 30);
        assert_eq!(cells[3].y, 10);
        assert_eq!(cells[8], Rect::new(60, 20, 30, 10));
    }
}
