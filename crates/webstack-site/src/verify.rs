//! Checks that a built site shows the values it was configured with.

use std::fs;
use std::path::{Path, PathBuf};

use webstack_gen::{NavigationCategory, SiteConfig};

/// Primary entry document inside the publish directory.
pub const INDEX_FILE: &str = "index.html";

/// The first check a built site failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationFailure {
    #[error("Public directory not generated: {}", .0.display())]
    OutputDirMissing(PathBuf),

    #[error("Index.html not generated: {}", .0.display())]
    IndexMissing(PathBuf),

    #[error("Error reading generated HTML: {0}")]
    Unreadable(String),

    #[error("Title '{0}' not found in generated HTML")]
    TitleMissing(String),

    #[error("Author '{0}' not found in generated HTML")]
    AuthorMissing(String),

    #[error("No navigation categories found in generated HTML")]
    NoCategory,
}

/// Result of verifying one built site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationOutcome {
    failure: Option<VerificationFailure>,
}

impl VerificationOutcome {
    /// Every check passed.
    pub fn passed() -> Self {
        Self { failure: None }
    }

    /// A check failed.
    pub fn failed(failure: VerificationFailure) -> Self {
        Self {
            failure: Some(failure),
        }
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    pub fn failure(&self) -> Option<&VerificationFailure> {
        self.failure.as_ref()
    }

    /// Diagnostic naming the failed check, or a success note.
    pub fn message(&self) -> String {
        match &self.failure {
            Some(failure) => failure.to_string(),
            None => "All configuration elements verified successfully".to_string(),
        }
    }
}

/// Verify the site built under `root` against the inputs it was built from.
///
/// Checks run in order and stop at the first failure: the publish directory
/// and its `index.html` exist, the title appears, the author appears (when
/// one was set), and at least one category name appears.
pub fn verify_site(
    root: &Path,
    config: &SiteConfig,
    categories: &[NavigationCategory],
) -> VerificationOutcome {
    let publish_dir = root.join(&config.publish_dir);
    if !publish_dir.is_dir() {
        return VerificationOutcome::failed(VerificationFailure::OutputDirMissing(publish_dir));
    }

    let index = publish_dir.join(INDEX_FILE);
    if !index.is_file() {
        return VerificationOutcome::failed(VerificationFailure::IndexMissing(index));
    }

    match fs::read_to_string(&index) {
        Ok(html) => verify_html(&html, config, categories),
        Err(e) => VerificationOutcome::failed(VerificationFailure::Unreadable(e.to_string())),
    }
}

/// Run the content checks against already-loaded HTML.
pub fn verify_html(
    html: &str,
    config: &SiteConfig,
    categories: &[NavigationCategory],
) -> VerificationOutcome {
    if !html.contains(&config.title) {
        return VerificationOutcome::failed(VerificationFailure::TitleMissing(
            config.title.clone(),
        ));
    }

    let author = config.author();
    if !author.is_empty() && !html.contains(author) {
        return VerificationOutcome::failed(VerificationFailure::AuthorMissing(
            author.to_string(),
        ));
    }

    // Navigation may be paginated, so one visible category is enough
    if !categories
        .iter()
        .any(|category| html.contains(&category.taxonomy))
    {
        return VerificationOutcome::failed(VerificationFailure::NoCategory);
    }

    VerificationOutcome::passed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;
    use webstack_gen::NavigationLink;

    fn demo_config(author: &str) -> SiteConfig {
        SiteConfig::new("https://example.com/", "Demo Site", author, "")
    }

    fn category(name: &str) -> NavigationCategory {
        NavigationCategory::new(name, vec![NavigationLink::new("Search", "https://test.org/")])
    }

    fn write_index(root: &Path, html: &[u8]) {
        let public = root.join("public");
        fs::create_dir_all(&public).unwrap();
        fs::write(public.join("index.html"), html).unwrap();
    }

    #[test]
    fn accepts_site_showing_all_values() {
        let temp = tempdir().unwrap();
        write_index(
            temp.path(),
            b"<title>Demo Site</title><meta name=author content=Alice><nav>Tools</nav>",
        );

        let outcome = verify_site(temp.path(), &demo_config("Alice"), &[category("Tools")]);

        assert!(outcome.is_success(), "{}", outcome.message());
        assert_eq!(
            outcome.message(),
            "All configuration elements verified successfully"
        );
    }

    #[test]
    fn reports_missing_publish_dir() {
        let temp = tempdir().unwrap();

        let outcome = verify_site(temp.path(), &demo_config("Alice"), &[category("Tools")]);

        assert!(matches!(
            outcome.failure(),
            Some(VerificationFailure::OutputDirMissing(_))
        ));
        assert!(outcome.message().starts_with("Public directory not generated"));
    }

    #[test]
    fn reports_missing_index_separately() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("public")).unwrap();

        let outcome = verify_site(temp.path(), &demo_config("Alice"), &[category("Tools")]);

        assert!(matches!(
            outcome.failure(),
            Some(VerificationFailure::IndexMissing(_))
        ));
    }

    #[test]
    fn honours_configured_publish_dir() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("index.html"), "Demo Site Alice Tools").unwrap();
        let config = SiteConfig {
            publish_dir: "dist".to_string(),
            ..demo_config("Alice")
        };

        let outcome = verify_site(temp.path(), &config, &[category("Tools")]);

        assert!(outcome.is_success());
    }

    #[test]
    fn reports_unreadable_index() {
        let temp = tempdir().unwrap();
        write_index(temp.path(), &[0xff, 0xfe, 0x00, 0xc3]);

        let outcome = verify_site(temp.path(), &demo_config("Alice"), &[category("Tools")]);

        assert!(matches!(
            outcome.failure(),
            Some(VerificationFailure::Unreadable(_))
        ));
        assert!(outcome.message().starts_with("Error reading generated HTML"));
    }

    #[test]
    fn title_is_checked_first() {
        let outcome = verify_html("nothing here", &demo_config("Alice"), &[category("Tools")]);

        assert_eq!(
            outcome.failure(),
            Some(&VerificationFailure::TitleMissing("Demo Site".to_string()))
        );
    }

    #[test]
    fn reports_missing_author() {
        let outcome = verify_html("Demo Site Tools", &demo_config("Alice"), &[category("Tools")]);

        assert_eq!(
            outcome.message(),
            "Author 'Alice' not found in generated HTML"
        );
    }

    #[test]
    fn empty_author_is_skipped() {
        let outcome = verify_html("Demo Site Tools", &demo_config(""), &[category("Tools")]);

        assert!(outcome.is_success());
    }

    #[test]
    fn one_visible_category_is_enough() {
        let categories = [category("Tools"), category("Reading"), category("Video")];

        let outcome = verify_html("Demo Site Alice Reading", &demo_config("Alice"), &categories);

        assert!(outcome.is_success());
    }

    #[test]
    fn reports_absent_navigation() {
        let categories = [category("Tools"), category("Reading")];

        let outcome = verify_html("Demo Site Alice", &demo_config("Alice"), &categories);

        assert_eq!(outcome.failure(), Some(&VerificationFailure::NoCategory));
    }
}
