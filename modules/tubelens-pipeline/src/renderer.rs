//! Derived presentation values and annotation markup.
//!
//! Writes each entry's annotation exactly once: the ledger transition to
//! Enriched is what keeps a rendered entry out of every later scan.

use crate::reconciler::StatsView;
use crate::state::EntryLedger;
use crate::traits::{EntryRef, ListingDom};

/// Like/dislike percentage pair, or the no-feedback sentinel.
/// Comments are excluded from the ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalRatio {
    NoFeedback,
    Split { like_pct: u8, dislike_pct: u8 },
}

impl ApprovalRatio {
    /// Rules applied in order: no feedback at all, one-sided counts, then a
    /// rounded like share with the dislike share as its exact complement.
    pub fn from_counts(likes: u64, dislikes: u64) -> Self {
        let total = likes + dislikes;
        if total == 0 {
            return ApprovalRatio::NoFeedback;
        }
        if likes == 0 {
            return ApprovalRatio::Split {
                like_pct: 0,
                dislike_pct: 100,
            };
        }
        if dislikes == 0 {
            return ApprovalRatio::Split {
                like_pct: 100,
                dislike_pct: 0,
            };
        }

        let like_pct = ((likes as f64 / total as f64) * 100.0).round() as u8;
        ApprovalRatio::Split {
            like_pct,
            dislike_pct: 100 - like_pct,
        }
    }
}

/// Render the resolved stats into the entry's metadata region and mark it
/// Enriched.
pub(crate) fn render(
    dom: &dyn ListingDom,
    ledger: &mut EntryLedger,
    entry: EntryRef,
    view: &StatsView,
) {
    dom.append_metadata(entry, &annotation_markup(view));
    ledger.mark_enriched(entry);
}

/// The appended annotation: a textual statistics line plus a proportional
/// two-segment bar (or the no-feedback indicator).
pub(crate) fn annotation_markup(view: &StatsView) -> String {
    let comments = match view.comments {
        Some(count) => count.to_string(),
        None => "disabled".to_string(),
    };
    let line = format!(
        "<span class=\"tubelens-stats\">Likes: {} Dislikes: {} Comments: {}</span>",
        view.likes, view.dislikes, comments
    );

    let bar = match ApprovalRatio::from_counts(view.likes, view.dislikes) {
        ApprovalRatio::NoFeedback => {
            "<span class=\"tubelens-bar tubelens-bar-empty\">no feedback</span>".to_string()
        }
        ApprovalRatio::Split {
            like_pct,
            dislike_pct,
        } => format!(
            "<span class=\"tubelens-bar\">\
             <span class=\"tubelens-bar-likes\" style=\"width:{like_pct}%\"></span>\
             <span class=\"tubelens-bar-dislikes\" style=\"width:{dislike_pct}%\"></span>\
             </span>"
        ),
    };

    format!("<div class=\"tubelens-annotation\">{line}{bar}</div>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_feedback_is_the_sentinel_never_a_ratio() {
        assert_eq!(ApprovalRatio::from_counts(0, 0), ApprovalRatio::NoFeedback);
    }

    #[test]
    fn one_sided_counts_pin_the_ratio() {
        assert_eq!(
            ApprovalRatio::from_counts(5, 0),
            ApprovalRatio::Split {
                like_pct: 100,
                dislike_pct: 0
            }
        );
        assert_eq!(
            ApprovalRatio::from_counts(0, 5),
            ApprovalRatio::Split {
                like_pct: 0,
                dislike_pct: 100
            }
        );
    }

    #[test]
    fn like_share_rounds_half_up_and_dislike_share_complements() {
        assert_eq!(
            ApprovalRatio::from_counts(1, 2),
            ApprovalRatio::Split {
                like_pct: 33,
                dislike_pct: 67
            }
        );
        assert_eq!(
            ApprovalRatio::from_counts(2, 1),
            ApprovalRatio::Split {
                like_pct: 67,
                dislike_pct: 33
            }
        );
        assert_eq!(
            ApprovalRatio::from_counts(1, 1),
            ApprovalRatio::Split {
                like_pct: 50,
                dislike_pct: 50
            }
        );
    }

    #[test]
    fn numeric_ratios_always_sum_to_one_hundred() {
        for (likes, dislikes) in [(1, 2), (3, 7), (120, 4), (1, 199), (999, 1)] {
            match ApprovalRatio::from_counts(likes, dislikes) {
                ApprovalRatio::Split {
                    like_pct,
                    dislike_pct,
                } => assert_eq!(like_pct as u32 + dislike_pct as u32, 100),
                ApprovalRatio::NoFeedback => panic!("expected a numeric ratio"),
            }
        }
    }

    #[test]
    fn markup_carries_counts_and_bar_widths() {
        let markup = annotation_markup(&StatsView {
            likes: 120,
            dislikes: 4,
            comments: Some(37),
        });
        assert!(markup.contains("Likes: 120 Dislikes: 4 Comments: 37"));
        assert!(markup.contains("width:97%"));
        assert!(markup.contains("width:3%"));
    }

    #[test]
    fn disabled_comments_and_no_feedback_render_as_text() {
        let markup = annotation_markup(&StatsView {
            likes: 0,
            dislikes: 0,
            comments: None,
        });
        assert!(markup.contains("Comments: disabled"));
        assert!(markup.contains("no feedback"));
        assert!(!markup.contains("width:"));
    }
}
