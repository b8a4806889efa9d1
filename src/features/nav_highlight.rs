use crate::config::NavConfig;
use crate::dom::ElementHandle;

/// Identifier of the page at `path`: its last segment without `.html`.
pub fn page_identifier(path: &str, home: &str) -> String {
    let last = path.rsplit('/').next().unwrap_or_default();
    let page = last.replacen(".html", "", 1);
    if page.is_empty() {
        home.to_string()
    } else {
        page
    }
}

/// Normalizes a link's `href` so it compares against [`page_identifier`].
pub fn link_target(href: &str) -> String {
    href.replacen(".html", "", 1).replacen("./", "", 1)
}

pub struct NavHighlighter<'a> {
    page: String,
    active_class: &'a str,
}

impl<'a> NavHighlighter<'a> {
    pub fn new(path: &str, config: &'a NavConfig) -> Self {
        Self {
            page: page_identifier(path, &config.home_page),
            active_class: &config.active_class,
        }
    }

    pub fn page(&self) -> &str {
        &self.page
    }

    pub fn is_active(&self, href: &str) -> bool {
        link_target(href) == self.page
    }

    /// Marks every link pointing at the current page; returns how many matched.
    pub fn apply<E: ElementHandle>(&self, links: &[E]) -> usize {
        let mut marked = 0;
        for link in links {
            let Some(href) = link.attr("href") else {
                continue;
            };
            if self.is_active(&href) {
                link.add_class(self.active_class);
                marked += 1;
            }
        }
        marked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::fake::FakeElement;

    fn links(hrefs: &[&str]) -> Vec<FakeElement> {
        hrefs
            .iter()
            .map(|href| FakeElement::new("a").with_attr("href", href))
            .collect()
    }

    #[test]
    fn identifier_strips_directories_and_extension() {
        assert_eq!(page_identifier("/about.html", "index"), "about");
        assert_eq!(page_identifier("/site/nested/contact.html", "index"), "contact");
        assert_eq!(page_identifier("/services", "index"), "services");
    }

    #[test]
    fn empty_paths_fall_back_to_home() {
        assert_eq!(page_identifier("/", "index"), "index");
        assert_eq!(page_identifier("", "index"), "index");
        assert_eq!(page_identifier("/docs/", "index"), "index");
    }

    #[test]
    fn link_targets_drop_extension_and_relative_marker() {
        assert_eq!(link_target("about.html"), "about");
        assert_eq!(link_target("./about.html"), "about");
        assert_eq!(link_target("about"), "about");
    }

    #[test]
    fn marks_only_the_current_page() {
        let config = NavConfig::default();
        let nav = links(&["index.html", "about.html", "./gallery.html", "contact.html"]);

        let marked = NavHighlighter::new("/about.html", &config).apply(&nav);

        assert_eq!(marked, 1);
        assert!(nav[1].has_class("active"));
        for other in [&nav[0], &nav[2], &nav[3]] {
            assert!(!other.has_class("active"));
        }
    }

    #[test]
    fn relative_href_matches() {
        let config = NavConfig::default();
        let nav = links(&["./about.html", "./index.html"]);

        NavHighlighter::new("/about.html", &config).apply(&nav);

        assert!(nav[0].has_class("active"));
        assert!(!nav[1].has_class("active"));
    }

    #[test]
    fn root_path_activates_index_link() {
        let config = NavConfig::default();
        let nav = links(&["index.html", "about.html"]);

        let highlighter = NavHighlighter::new("/", &config);
        assert_eq!(highlighter.page(), "index");
        assert_eq!(highlighter.apply(&nav), 1);
        assert!(nav[0].has_class("active"));
    }

    #[test]
    fn links_without_href_are_skipped() {
        let config = NavConfig::default();
        let nav = vec![FakeElement::new("a"), FakeElement::new("a").with_attr("href", "about.html")];

        assert_eq!(NavHighlighter::new("/about.html", &config).apply(&nav), 1);
        assert!(nav[0].classes().is_empty());
    }
}
