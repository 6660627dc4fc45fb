pub mod categories;
pub mod depth;
pub mod judges;
pub mod models;
pub mod overview;
pub mod questions;

/// Display label for a coefficient of variation, used by the text views.
pub(crate) fn cv_label(cv: f64) -> &'static str {
    if cv < 10.0 {
        "low"
    } else if cv < 25.0 {
        "moderate"
    } else {
        "high"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cv_labels_follow_badge_thresholds() {
        assert_eq!(cv_label(0.0), "low");
        assert_eq!(cv_label(9.9), "low");
        assert_eq!(cv_label(10.0), "moderate");
        assert_eq!(cv_label(24.9), "moderate");
        assert_eq!(cv_label(25.0), "high");
    }
}
