//! Static substitute for the interactive map.
//!
//! Built from the session database, so the cards show the same statistics
//! and links as the tooltips. Without a database (the dataset never loaded)
//! the view is a contact panel; it is never empty.

use mrm_db::models::{BasinCard, ProjectCard, Totals};
use mrm_db::Database;
use mrm_utils::links;

pub const CONTACT_PHONE: &str = "(720) 318-6907";
pub const CONTACT_EMAIL: &str = "info@mineralrightsmarket.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackVariant {
    #[default]
    Basins,
    Projects,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactPanel {
    pub title: String,
    pub message: String,
    pub contact_url: String,
    pub phone: String,
    pub email: String,
}

impl Default for ContactPanel {
    fn default() -> Self {
        Self {
            title: "Interactive Map Unavailable".to_string(),
            message: "We're having trouble loading our service area. Contact us directly \
                      to discuss your mineral rights in any basin."
                .to_string(),
            contact_url: links::CONTACT_PATH.to_string(),
            phone: CONTACT_PHONE.to_string(),
            email: CONTACT_EMAIL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FallbackView {
    BasinGrid { cards: Vec<BasinCard>, totals: Totals },
    ProjectGrid { cards: Vec<ProjectCard>, totals: Totals },
    ContactPanel(ContactPanel),
}

impl FallbackView {
    pub fn render(db: Option<&Database>, variant: FallbackVariant) -> Self {
        let Some(db) = db else {
            return FallbackView::ContactPanel(ContactPanel::default());
        };
        match Self::grid(db, variant) {
            Ok(view) => view,
            Err(err) => {
                log::error!("[MRM] fallback grid unavailable: {:#}", err);
                FallbackView::ContactPanel(ContactPanel::default())
            }
        }
    }

    fn grid(db: &Database, variant: FallbackVariant) -> anyhow::Result<Self> {
        let totals = db.query_totals()?;
        let view = match variant {
            FallbackVariant::Basins => {
                let cards = db.query_basin_cards()?;
                if cards.is_empty() {
                    anyhow::bail!("no basins");
                }
                FallbackView::BasinGrid { cards, totals }
            }
            FallbackVariant::Projects => {
                let cards = db.query_project_cards()?;
                if cards.is_empty() {
                    // No project sites: the basin grid still covers every CTA.
                    return Self::grid(db, FallbackVariant::Basins);
                }
                FallbackView::ProjectGrid { cards, totals }
            }
        };
        Ok(view)
    }

    pub fn card_count(&self) -> usize {
        match self {
            FallbackView::BasinGrid { cards, .. } => cards.len(),
            FallbackView::ProjectGrid { cards, .. } => cards.len(),
            FallbackView::ContactPanel(_) => 0,
        }
    }

    /// Every rendering carries either cards or contact details.
    pub fn is_blank(&self) -> bool {
        match self {
            FallbackView::ContactPanel(panel) => panel.phone.is_empty() && panel.contact_url.is_empty(),
            _ => self.card_count() == 0,
        }
    }
}
