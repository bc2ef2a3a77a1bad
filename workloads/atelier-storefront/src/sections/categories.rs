//! Category pills.

use atelier_commerce::search::CategoryChoice;

use super::html_escape;

/// A selectable category control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPill {
    pub label: String,
    pub choice: CategoryChoice,
}

impl CategoryPill {
    /// The reset pill, always first.
    pub fn all() -> Self {
        Self {
            label: "All".to_string(),
            choice: CategoryChoice::All,
        }
    }

    pub fn category(name: &str) -> Self {
        Self {
            label: name.to_string(),
            choice: CategoryChoice::Specific(name.to_string()),
        }
    }

    /// Pills for a category list: "All" then one per category.
    pub fn for_categories(categories: &[String]) -> Vec<Self> {
        std::iter::once(Self::all())
            .chain(categories.iter().map(|c| Self::category(c)))
            .collect()
    }
}

/// Markup for the category list.
pub fn render_categories(pills: &[CategoryPill]) -> String {
    pills
        .iter()
        .map(|pill| {
            format!(
                r#"<button class="pill" type="button" data-action="category" data-category="{}">{}</button>"#,
                html_escape(pill.choice.as_filter()),
                html_escape(&pill.label)
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_comes_first() {
        let pills = CategoryPill::for_categories(&["Oud".to_string(), "Musk".to_string()]);
        assert_eq!(pills.len(), 3);
        assert_eq!(pills[0], CategoryPill::all());
        assert_eq!(pills[1].choice, CategoryChoice::Specific("Oud".to_string()));
        assert_eq!(pills[2].label, "Musk");
    }

    #[test]
    fn test_render() {
        let html = render_categories(&CategoryPill::for_categories(&["Oud & Amber".to_string()]));
        assert!(html.starts_with(r#"<button class="pill" type="button" data-action="category" data-category="all">All</button>"#));
        assert!(html.contains(r#"data-category="Oud &amp; Amber">Oud &amp; Amber</button>"#));
    }

    #[test]
    fn test_empty_catalog_still_has_reset() {
        let pills = CategoryPill::for_categories(&[]);
        assert_eq!(pills, vec![CategoryPill::all()]);
    }
}
