use crate::config::ColumnConfig;
use std::fmt;

/// Chart types the user can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
    Pie,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Line, ChartKind::Bar, ChartKind::Pie];

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Line => "Line Chart",
            ChartKind::Bar => "Bar Chart",
            ChartKind::Pie => "Pie Chart",
        }
    }

    /// Line and bar charts plot numbers; the pie chart counts categories.
    pub fn is_numeric(self) -> bool {
        matches!(self, ChartKind::Line | ChartKind::Bar)
    }

    /// Column that an appended value is written to.
    pub fn target_column(self, columns: &ColumnConfig) -> &str {
        match self {
            ChartKind::Line => &columns.line_value,
            ChartKind::Bar => &columns.bar_value,
            ChartKind::Pie => &columns.category,
        }
    }

    /// Every column the chart needs in order to be drawn.
    pub fn required_columns(self, columns: &ColumnConfig) -> Vec<&str> {
        match self {
            ChartKind::Line | ChartKind::Bar => {
                vec![columns.date.as_str(), self.target_column(columns)]
            }
            ChartKind::Pie => vec![columns.category.as_str()],
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_columns_follow_config() {
        let columns = ColumnConfig::default();
        assert_eq!(ChartKind::Line.required_columns(&columns), vec!["Date", "Value1"]);
        assert_eq!(ChartKind::Bar.required_columns(&columns), vec!["Date", "Value2"]);
        assert_eq!(ChartKind::Pie.required_columns(&columns), vec!["Category"]);
    }

    #[test]
    fn only_pie_accepts_text() {
        assert!(ChartKind::Line.is_numeric());
        assert!(ChartKind::Bar.is_numeric());
        assert!(!ChartKind::Pie.is_numeric());
        assert_eq!(ChartKind::default(), ChartKind::Line);
    }
}
