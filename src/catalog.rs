// SPDX-License-Identifier: MPL-2.0
//! Works and videos shown in the gallery, plus the project list of the home page.
//!
//! A built-in catalog is always available. A TOML file can replace it:
//!
//! ```toml
//! [[works]]
//! id = 1
//! title = "Logo animation"
//! description = "Logo animation for Deakin University."
//! media_source = "media/deakin_logo.mp4"
//! category = "Design, animation"
//! duration_secs = 18.0
//! ```
//!
//! Relative `media_source` paths are resolved against the catalog's directory.
//! `bundled:<name>` names a clip shipped with the application.

use crate::error::{Error, Result};
use crate::gallery::GalleryTab;
use crate::playback::MediaSource;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// Identifier of a catalog entry, unique within its tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaId(pub u32);

impl fmt::Display for MediaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: MediaId,
    pub title: String,
    pub description: String,
    pub media_source: MediaSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
}

/// A project card on the home page. Clicking its thumbnail opens the
/// gallery on the videos tab focused on `video_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub title: String,
    pub tag: String,
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_id: Option<MediaId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub works: Vec<CatalogEntry>,
    #[serde(default)]
    pub videos: Vec<CatalogEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    #[must_use]
    pub fn entries(&self, tab: GalleryTab) -> &[CatalogEntry] {
        match tab {
            GalleryTab::Works => &self.works,
            GalleryTab::Videos => &self.videos,
        }
    }

    #[must_use]
    pub fn find(&self, tab: GalleryTab, id: MediaId) -> Option<&CatalogEntry> {
        self.entries(tab).iter().find(|entry| entry.id == id)
    }

    /// Checks that ids are unique per tab and every project link resolves.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Catalog`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        for tab in GalleryTab::ALL {
            let mut seen = HashSet::new();
            for entry in self.entries(tab) {
                if !seen.insert(entry.id) {
                    return Err(Error::Catalog(format!("duplicate {tab} id {}", entry.id)));
                }
                if entry.title.trim().is_empty() {
                    return Err(Error::Catalog(format!("{tab} {} has no title", entry.id)));
                }
            }
        }
        for project in &self.projects {
            if let Some(id) = project.video_id {
                if self.find(GalleryTab::Videos, id).is_none() {
                    return Err(Error::Catalog(format!(
                        "project \"{}\" links to unknown video {id}",
                        project.title
                    )));
                }
            }
        }
        Ok(())
    }

    /// Parses and validates a catalog. A file without `[[projects]]` keeps the
    /// built-in home page projects.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for malformed TOML and [`Error::Catalog`]
    /// for an invalid catalog.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut catalog: Catalog = toml::from_str(content)?;
        if catalog.projects.is_empty() {
            catalog.projects = builtin_projects()
                .into_iter()
                .filter(|project| {
                    project
                        .video_id
                        .is_none_or(|id| catalog.find(GalleryTab::Videos, id).is_some())
                })
                .collect();
        }
        catalog.validate()?;
        Ok(catalog)
    }

    /// Loads a catalog file on the async runtime.
    ///
    /// Relative media paths are resolved against the directory of the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid catalog.
    pub async fn load(path: PathBuf) -> Result<Self> {
        let content = tokio::fs::read_to_string(&path).await?;
        let mut catalog = Self::from_toml_str(&content)?;
        if let Some(base) = path.parent() {
            catalog.resolve_media(base);
        }
        log::info!(
            "loaded catalog from {} ({} works, {} videos)",
            path.display(),
            catalog.works.len(),
            catalog.videos.len()
        );
        Ok(catalog)
    }

    fn resolve_media(&mut self, base: &Path) {
        for entry in self.works.iter_mut().chain(self.videos.iter_mut()) {
            entry.media_source = entry.media_source.clone().resolved_against(base);
        }
    }

    /// The six portfolio pieces shipped with the application.
    #[must_use]
    pub fn builtin() -> Self {
        let entry = |id: u32,
                     title: &str,
                     description: &str,
                     clip: &str,
                     category: &str,
                     duration_secs: f64| CatalogEntry {
            id: MediaId(id),
            title: title.to_string(),
            description: description.to_string(),
            media_source: MediaSource::Bundled(clip.to_string()),
            category: Some(category.to_string()),
            duration_secs: Some(duration_secs),
        };

        let works = vec![
            entry(
                1,
                "Logo animation",
                "Logo animation for Deakin University.",
                "deakin_logo",
                "Design, animation",
                18.0,
            ),
            entry(
                2,
                "NIKE",
                "Nike motion design and figma animation.",
                "nike",
                "Figma, Motion design",
                24.0,
            ),
            entry(
                3,
                "Dr.Pepper",
                "Dr.Pepper motion design and figma animation.",
                "drpepper",
                "Figma, Motion design",
                21.0,
            ),
            entry(
                4,
                "TESLA",
                "Tesla Model S motion design and figma animation.",
                "tesla_figma",
                "Figma, Motion design",
                32.0,
            ),
            entry(
                5,
                "College-Event-Hub",
                "UI/UX design for web application and full Stack development.",
                "college_event_hub",
                "Design and Web Development",
                45.0,
            ),
            entry(
                6,
                "Extension",
                "AI-powered phishing detection Chrome extension.",
                "phishing",
                "AI/ML, Cyber Security",
                38.0,
            ),
        ];
        let videos = works
            .iter()
            .map(|work| CatalogEntry {
                category: None,
                ..work.clone()
            })
            .collect();

        Self {
            works,
            videos,
            projects: builtin_projects(),
        }
    }
}

fn builtin_projects() -> Vec<ProjectEntry> {
    let project = |title: &str, tag: &str, description: &str, technologies: &[&str], video: u32| {
        ProjectEntry {
            title: title.to_string(),
            tag: tag.to_string(),
            description: description.to_string(),
            technologies: technologies.iter().map(|t| (*t).to_string()).collect(),
            video_id: Some(MediaId(video)),
        }
    };

    vec![
        project(
            "JARVIS for System",
            "AI Assistant",
            "Natural language assistant able to converse and perform operational tasks.",
            &["LLM", "Python", "TensorFlow", "Torch", "pandas", "selenium"],
            1,
        ),
        project(
            "Phishing Detection Tool",
            "AI Chrome Extension",
            "Real-time Chrome extension using a Random Forest model to detect phishing websites.",
            &["JavaScript", "CSS & HTML", "Python", "AI & ML"],
            2,
        ),
        project(
            "Cryptography with Steganography Web Tool",
            "Web Development",
            "Encrypts and conceals data in image, video, audio and text files.",
            &["JavaScript", "CSS", "Python", "Flask", "cryptography"],
            3,
        ),
        project(
            "Emotion Detection from Voice",
            "HCI & ML",
            "Speech emotion recognition built on an LSTM network.",
            &["TKinter", "ML", "Python"],
            4,
        ),
        project(
            "Restaurant Management System",
            "Web Development",
            "Full-stack ordering site with accounts, cart, inventory and payment.",
            &["JavaScript", "CSS", "HTML", "PHP", "SQL"],
            5,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
[[works]]
id = 1
title = "Logo animation"
description = "Logo animation for Deakin University."
media_source = "assets/media/deakin_logo.mp4"
category = "Design, animation"
duration_secs = 18.0

[[videos]]
id = 7
title = "Showreel"
description = "Yearly showreel."
media_source = "https://cdn.example.invalid/showreel.mp4"
"#;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = Catalog::builtin();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.works.len(), 6);
        assert_eq!(catalog.videos.len(), 6);
        assert_eq!(catalog.projects.len(), 5);
    }

    #[test]
    fn entries_follow_tab() {
        let catalog = Catalog::builtin();
        assert!(catalog.find(GalleryTab::Videos, MediaId(3)).is_some());
        assert!(catalog.find(GalleryTab::Videos, MediaId(42)).is_none());
        assert!(catalog.entries(GalleryTab::Works)[0].category.is_some());
        assert!(catalog.entries(GalleryTab::Videos)[0].category.is_none());
    }

    #[test]
    fn parses_toml_catalog() {
        let catalog = Catalog::from_toml_str(SAMPLE).expect("valid catalog");
        assert_eq!(catalog.works.len(), 1);
        assert_eq!(
            catalog.videos[0].media_source,
            MediaSource::Url("https://cdn.example.invalid/showreel.mp4".to_string())
        );
        assert_eq!(catalog.videos[0].duration_secs, None);
        // Built-in projects link to videos 1..=5, none of which exist here.
        assert!(catalog.projects.is_empty());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let content = format!(
            "{SAMPLE}\n[[videos]]\nid = 7\ntitle = \"Again\"\ndescription = \"\"\nmedia_source = \"a.mp4\"\n"
        );
        assert!(matches!(
            Catalog::from_toml_str(&content),
            Err(Error::Catalog(_))
        ));
    }

    #[test]
    fn project_link_to_unknown_video_is_rejected() {
        let content = format!(
            "{SAMPLE}\n[[projects]]\ntitle = \"Orphan\"\ntag = \"Web\"\ndescription = \"\"\nvideo_id = 99\n"
        );
        assert!(matches!(
            Catalog::from_toml_str(&content),
            Err(Error::Catalog(_))
        ));
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        assert!(matches!(
            Catalog::from_toml_str("[[works]\nid ="),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn builtin_media_needs_no_files() {
        let catalog = Catalog::builtin();
        for tab in GalleryTab::ALL {
            assert!(catalog
                .entries(tab)
                .iter()
                .all(|entry| matches!(entry.media_source, MediaSource::Bundled(_))));
        }
    }

    #[tokio::test]
    async fn load_resolves_media_next_to_the_catalog() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(SAMPLE.as_bytes()).expect("write catalog");
        let base = file.path().parent().expect("temp dir").to_path_buf();

        let catalog = Catalog::load(file.path().to_path_buf())
            .await
            .expect("valid catalog");
        assert_eq!(
            catalog.works[0].media_source,
            MediaSource::File(base.join("assets/media/deakin_logo.mp4"))
        );
        assert!(matches!(catalog.videos[0].media_source, MediaSource::Url(_)));
    }

    #[tokio::test]
    async fn async_load_reports_missing_file() {
        let result = Catalog::load(PathBuf::from("/no/such/catalog.toml")).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
