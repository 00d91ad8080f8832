#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusedPane {
    Databases,
    #[default]
    Panels,
    History,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            Self::Databases => Self::Panels,
            Self::Panels => Self::History,
            Self::History => Self::Databases,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Databases => "Databases",
            Self::Panels => "Panels",
            Self::History => "History",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_is_panels() {
        assert_eq!(FocusedPane::default(), FocusedPane::Panels);
    }

    #[rstest]
    #[case(FocusedPane::Databases, FocusedPane::Panels)]
    #[case(FocusedPane::Panels, FocusedPane::History)]
    #[case(FocusedPane::History, FocusedPane::Databases)]
    fn next_cycles_through_panes(#[case] from: FocusedPane, #[case] expected: FocusedPane) {
        assert_eq!(from.next(), expected);
    }
}
