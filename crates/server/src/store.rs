use pitchmatch_common::{PitchMatchError, Result};
use pitchmatch_vector::Document;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Minimum number of stored proposals before the file replaces the defaults
pub const MIN_STORED_PROPOSALS: usize = 3;

/// JSON-file backed proposal corpus
pub struct ProposalStore {
    file_path: PathBuf,
    write_lock: Mutex<()>,
}

impl ProposalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Snapshot of the corpus.
    ///
    /// Falls back to the built-in proposals when the file is missing, holds a
    /// JSON value other than an array, or has fewer than three entries.
    /// Broken JSON or a malformed entry is an error so the file is never
    /// overwritten by `append`.
    pub async fn load(&self) -> Result<Vec<Document>> {
        let data = match tokio::fs::read_to_string(&self.file_path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No proposal store at {}, using defaults", self.file_path.display());
                return Ok(default_proposals());
            }
            Err(e) => {
                return Err(PitchMatchError::storage(format!(
                    "Failed to read {}: {}",
                    self.file_path.display(),
                    e
                )))
            }
        };

        let value: serde_json::Value = serde_json::from_str(&data).map_err(|e| {
            PitchMatchError::storage(format!(
                "Proposal store {} is not valid JSON: {}",
                self.file_path.display(),
                e
            ))
        })?;

        match value {
            serde_json::Value::Array(entries) if entries.len() >= MIN_STORED_PROPOSALS => {
                entries
                    .into_iter()
                    .enumerate()
                    .map(|(i, entry)| {
                        serde_json::from_value::<Document>(entry).map_err(|e| {
                            PitchMatchError::storage(format!(
                                "Proposal #{} in {} is malformed: {}",
                                i,
                                self.file_path.display(),
                                e
                            ))
                        })
                    })
                    .collect()
            }
            serde_json::Value::Array(entries) => {
                debug!(
                    "Proposal store holds {} entries, using defaults",
                    entries.len()
                );
                Ok(default_proposals())
            }
            _ => {
                warn!(
                    "Proposal store {} is not a list, using defaults",
                    self.file_path.display()
                );
                Ok(default_proposals())
            }
        }
    }

    /// Append a proposal and write the corpus back
    pub async fn append(&self, proposal: Document) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut proposals = self.load().await?;
        info!(
            "Storing proposal '{}' ({} chars), corpus size {}",
            proposal.name,
            proposal.content.len(),
            proposals.len() + 1
        );
        proposals.push(proposal);
        self.save(&proposals).await
    }

    async fn save(&self, proposals: &[Document]) -> Result<()> {
        let data = serde_json::to_string_pretty(proposals)?;
        tokio::fs::write(&self.file_path, data).await.map_err(|e| {
            PitchMatchError::storage(format!(
                "Failed to write {}: {}",
                self.file_path.display(),
                e
            ))
        })?;
        Ok(())
    }
}

/// Built-in sample proposals used until the store holds enough of its own
pub fn default_proposals() -> Vec<Document> {
    vec![
        Document::new(
            "Question Proposal",
            "Hello,\n\nThank you for the opportunity. I’ve carefully reviewed your project — this is not just an AI integration, but the creation of a complete intelligent communication agent capable of handling calls, emails, and lead qualification with precision and natural interaction.\n\nBefore we begin, a few quick clarifications:\n●  Do you already use any telephony platform (Twilio, Asterisk, Dialogflow CX, etc.)?\n● Should the AI handle both voice and text interactions autonomously, or in a hybrid (AI + human handoff) model?\n● Do you have an existing CRM or sales pipeline system to integrate with?\n\nWith deep experience in AI agents, NLP, speech processing, and system integrations (voice + email + CRM), I can design and build a multi-channel AI assistant that automates communication, optimizes sales funnels, and ensures seamless collaboration between AI and human teams.\n\nI focus on delivering robust, scalable, and context-aware AI systems with voice synthesis, speech-to-text, intent recognition, and workflow automation — all tailored to your operational goals.\n\nI can start immediately and deliver an MVP that handles calls, email organization, and lead qualification — ready for real-world use and scaling.",
        ),
        Document::new(
            "2 Way suggestion Proposal",
            "Hi there,\nI just read all the requirements.\nHowever, I have carefully read your project description and submitted my bid after thorough research and preparation.\nThis is my proposal for project:\n\nThe objective is to build a professional landing page and integrated blog for your B2B IT consulting firm. The landing page will be designed to highlight services clearly, with a modern responsive layout optimized for lead conversion. The blog will be implemented with a CMS like WordPress to allow easy publishing of articles, industry updates, and news.\n\nI suggest two possible approaches:\nOption A: Develop the entire site on WordPress, including the landing page and blog. This ensures full CMS control, simple content updates, and access to powerful plugins for SEO and performance optimization.\nOption B: Create a custom-coded landing page (HTML, CSS, JavaScript, PHP) optimized for speed and conversions, and integrate it with a separate WordPress blog. This option offers maximum performance for the landing page while still giving you easy blog management.\n\nBoth approaches will ensure a modern, responsive design, SEO optimization, and smooth user experience aimed at generating leads and improving your online presence.\n\nLet's discuss in detail through chat.\n\nDeadline: 3 to 4 weeks\nBudget: 1,500 to 2,500 USD depending on chosen option and customization level",
        ),
        Document::new(
            "Robert - DSAT Homework Coach with OpenAI & Airtable Integration",
            "Hello,\n\nAs I am very strong in OpenAI API (Custom GPT Actions), Airtable API, and backend development with Node.js/Express and Python/FastAPI, I can confidently build your DSAT Homework Coach to enforce the step-by-step workflow and log all student activity (steps, timing, mastery) into Airtable for Softr dashboards.\n\nPlease check some of my related projects:\nhttps://github.com/CloudDev777/AI-Powered-Data-Enrichment-System\nhttps://github.com/CloudDev777/Serpapi_to_Airtable_Automation\nhttps://github.com/CloudDev777/AI-Content-Generation-Platform\n\nWith 7+ years of experience, I’ve delivered GPT-integrated education tools and data pipelines, including strict multi-step interactions, Airtable-first schemas, and lightweight backends that expose clean endpoints for client apps. I’ve implemented mastery tracking, spaced repetition, and adaptive difficulty tied to tagged content.\n\nI also focus on workflow architecture, validation gates at every step, exception handling with retries, structured logging/audit trails, idempotent updates, and rate limiting to ensure stability and scalability.\n\nI’m confident I can deliver an MVP in 1–2 weeks: a sandbox Airtable base (Items, Students, StudentProgress, Submissions), two endpoints (get_next_question, grade_step), and a connected Custom GPT Action that strictly enforces the paraphrase → prediction → elimination → final sequence, plus clear documentation for your team to maintain and merge into the main LMS.\n\nI’m available full-time (40+ hours/week) and can start immediately. Looking forward to hearing from you soon.\nBest regards,\nRobert",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(n: usize) -> Vec<Document> {
        (0..n)
            .map(|i| Document::new(format!("P{}", i), format!("proposal body {}", i)))
            .collect()
    }

    #[tokio::test]
    async fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProposalStore::new(dir.path().join("proposal_store.json"));
        assert_eq!(store.load().await.unwrap(), default_proposals());
    }

    #[tokio::test]
    async fn test_small_store_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proposal_store.json");
        std::fs::write(&path, serde_json::to_string(&sample(2)).unwrap()).unwrap();

        let store = ProposalStore::new(&path);
        assert_eq!(store.load().await.unwrap(), default_proposals());
    }

    #[tokio::test]
    async fn test_non_list_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proposal_store.json");
        std::fs::write(&path, r#"{"not":"a list"}"#).unwrap();

        let store = ProposalStore::new(&path);
        assert_eq!(store.load().await.unwrap(), default_proposals());
    }

    #[tokio::test]
    async fn test_append_to_broken_store_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proposal_store.json");

        let mut entries = serde_json::to_value(sample(4)).unwrap();
        entries
            .as_array_mut()
            .unwrap()
            .push(serde_json::json!({ "name": "no content" }));
        let malformed_entry = serde_json::to_string_pretty(&entries).unwrap();

        for original in [malformed_entry.as_str(), "[{\"name\": \"P0\","] {
            std::fs::write(&path, original).unwrap();

            let store = ProposalStore::new(&path);
            assert!(store.load().await.is_err());
            assert!(store
                .append(Document::new("new", "x"))
                .await
                .is_err());
            assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
        }
    }

    #[tokio::test]
    async fn test_stored_proposals_loaded_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proposal_store.json");
        std::fs::write(&path, serde_json::to_string(&sample(4)).unwrap()).unwrap();

        let store = ProposalStore::new(&path);
        assert_eq!(store.load().await.unwrap(), sample(4));
    }

    #[tokio::test]
    async fn test_append_extends_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProposalStore::new(dir.path().join("proposal_store.json"));

        store
            .append(Document::new("New", "A fresh proposal"))
            .await
            .unwrap();
        store
            .append(Document::new("New", "A fresh proposal"))
            .await
            .unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.len(), 5);
        assert_eq!(&loaded[..3], &default_proposals()[..]);
        // duplicates are kept
        assert_eq!(loaded[3], loaded[4]);
    }

    #[tokio::test]
    async fn test_concurrent_appends_all_kept() {
        let dir = tempfile::tempdir().unwrap();
        let store = std::sync::Arc::new(ProposalStore::new(dir.path().join("store.json")));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .append(Document::new(format!("P{}", i), "body"))
                        .await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.load().await.unwrap().len(), 3 + 8);
    }

    #[tokio::test]
    async fn test_unreadable_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        // a directory cannot be read as a file
        let store = ProposalStore::new(dir.path());
        assert!(store.load().await.is_err());
    }
}
