//! Process-lifetime font resolution cache with single-flight lookups.
//!
//! Each [`FontId`] moves through at most these states:
//!
//! - absent: never resolved, or the last attempt failed
//! - pending: one lookup in flight; later callers attach to it
//! - registered: faces known, never fetched again
//!
//! A failed lookup returns the slot to absent so a later call may retry.
//! Every caller attached to the same flight observes the same outcome.

use super::parse::parse_font_faces;
use super::{FontFace, FontFaceSet, FontId, FontSource, PDF_WEIGHTS};
use futures::future::{BoxFuture, FutureExt, Shared};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

type Lookup = Shared<BoxFuture<'static, Option<Arc<FontFaceSet>>>>;

enum Slot {
    Registered(Arc<FontFaceSet>),
    Pending { generation: u64, lookup: Lookup },
}

/// Outcome of [`FontCache::resolve`]
#[derive(Debug, Clone, PartialEq)]
pub struct FontResolution {
    pub font: FontId,
    pub registered: bool,
    pub faces: Option<Arc<FontFaceSet>>,
}

impl FontResolution {
    fn from_outcome(font: FontId, faces: Option<Arc<FontFaceSet>>) -> Self {
        Self { font, registered: faces.is_some(), faces }
    }
}

/// Font cache shared by every render in the process.
///
/// Construct once and pass it (usually behind an `Arc`) to each renderer.
/// The internal lock is never held across an await point.
pub struct FontCache {
    source: Arc<dyn FontSource>,
    embed_files: bool,
    slots: Mutex<HashMap<FontId, Slot>>,
    next_generation: AtomicU64,
}

impl FontCache {
    pub fn new(source: Arc<dyn FontSource>) -> Self {
        Self::with_embedding(source, true)
    }

    /// When `embed_files` is false only the file URLs are recorded
    pub fn with_embedding(source: Arc<dyn FontSource>, embed_files: bool) -> Self {
        Self {
            source,
            embed_files,
            slots: Mutex::new(HashMap::new()),
            next_generation: AtomicU64::new(0),
        }
    }

    /// Resolve `font`, performing at most one external lookup per flight.
    ///
    /// Never fails: an unsuccessful lookup yields `registered: false` and the
    /// caller substitutes a fallback family.
    pub async fn resolve(&self, font: FontId) -> FontResolution {
        let (generation, lookup) = {
            let mut slots = self.lock();
            match slots.get(&font) {
                Some(Slot::Registered(faces)) => {
                    debug!("font '{}' already registered", font);
                    return FontResolution::from_outcome(font, Some(faces.clone()));
                }
                Some(Slot::Pending { generation, lookup }) => {
                    debug!("attaching to in-flight lookup for font '{}'", font);
                    (*generation, lookup.clone())
                }
                None => {
                    debug!("starting lookup for font '{}'", font);
                    let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
                    let lookup = lookup_faces(self.source.clone(), font, self.embed_files)
                        .boxed()
                        .shared();
                    slots.insert(font, Slot::Pending { generation, lookup: lookup.clone() });
                    (generation, lookup)
                }
            }
        };

        let outcome = lookup.await;

        {
            let mut slots = self.lock();
            // Only the flight that still owns the slot may settle it
            let owns_slot = matches!(
                slots.get(&font),
                Some(Slot::Pending { generation: g, .. }) if *g == generation
            );
            if owns_slot {
                match &outcome {
                    Some(faces) => {
                        slots.insert(font, Slot::Registered(faces.clone()));
                    }
                    None => {
                        slots.remove(&font);
                    }
                }
            }
        }

        FontResolution::from_outcome(font, outcome)
    }

    pub fn is_registered(&self, font: FontId) -> bool {
        matches!(self.lock().get(&font), Some(Slot::Registered(_)))
    }

    pub fn registered_count(&self) -> usize {
        self.lock()
            .values()
            .filter(|slot| matches!(slot, Slot::Registered(_)))
            .count()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<FontId, Slot>> {
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

async fn lookup_faces(source: Arc<dyn FontSource>, font: FontId, embed_files: bool) -> Option<Arc<FontFaceSet>> {
    let family = font.family();
    let css = match source.describe(family, &PDF_WEIGHTS).await {
        Ok(css) => css,
        Err(e) => {
            warn!("font lookup for '{}' failed, using fallback: {}", family, e);
            return None;
        }
    };

    let refs = parse_font_faces(&css, &PDF_WEIGHTS);
    if refs.is_empty() {
        warn!("no font files found for '{}', using fallback", family);
        return None;
    }

    let mut faces = Vec::with_capacity(refs.len());
    for (weight, src) in refs {
        let data = if embed_files {
            match source.fetch_file(&src).await {
                Ok(bytes) if bytes.is_empty() => {
                    warn!("font file {} for '{}' is empty, dropping weight {}", src, family, weight.numeric());
                    continue;
                }
                Ok(bytes) => match ttf_parser::Face::parse(&bytes, 0).map(|_| ()) {
                    Ok(()) => Some(Arc::new(bytes)),
                    Err(e) => {
                        warn!("font file {} for '{}' does not parse ({}), dropping weight {}", src, family, e, weight.numeric());
                        continue;
                    }
                },
                Err(e) => {
                    warn!("dropping weight {} of '{}': {}", weight.numeric(), family, e);
                    continue;
                }
            }
        } else {
            None
        };
        faces.push(FontFace { weight, src, data });
    }

    if faces.is_empty() {
        warn!("no usable font files for '{}', using fallback", family);
        return None;
    }

    info!("registered font family '{}' with {} weight(s)", family, faces.len());
    Some(Arc::new(FontFaceSet { family: family.to_string(), faces }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typography::FontWeight;
    use crate::{Error, Result};
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    struct ScriptedSource {
        describes: AtomicUsize,
        css: Mutex<String>,
        fail_files: bool,
    }

    impl ScriptedSource {
        fn new(css: &str) -> Arc<Self> {
            Arc::new(Self { describes: AtomicUsize::new(0), css: Mutex::new(css.to_string()), fail_files: false })
        }

        fn calls(&self) -> usize {
            self.describes.load(Ordering::SeqCst)
        }
    }

    impl FontSource for ScriptedSource {
        fn describe<'a>(&'a self, _family: &'a str, _weights: &'a [FontWeight]) -> BoxFuture<'a, Result<String>> {
            async move {
                self.describes.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(30)).await;
                let css = self.css.lock().unwrap().clone();
                Ok(css)
            }
            .boxed()
        }

        fn fetch_file<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>>> {
            async move {
                if self.fail_files {
                    Err(Error::FontLookup(format!("refused {}", url)))
                } else if url.contains("broken") {
                    Ok(url.as_bytes().to_vec())
                } else {
                    Ok(MONTSERRAT.to_vec())
                }
            }
            .boxed()
        }
    }

    const MONTSERRAT: &[u8] = include_bytes!("../../tests/fixtures/fonts/Montserrat-Regular.ttf");

    const CSS: &str = "@font-face { font-weight: 400; src: url(https://f/r.ttf); }\n@font-face { font-weight: 700; src: url(https://f/b.ttf); }";

    #[tokio::test]
    async fn sequential_resolves_hit_the_cache() {
        let source = ScriptedSource::new(CSS);
        let cache = FontCache::new(source.clone());

        let first = cache.resolve(FontId::Inter).await;
        let second = cache.resolve(FontId::Inter).await;

        assert!(first.registered);
        assert_eq!(first, second);
        assert_eq!(source.calls(), 1);
        assert!(cache.is_registered(FontId::Inter));
        let faces = first.faces.unwrap();
        assert_eq!(faces.faces.len(), 2);
        assert_eq!(faces.faces[0].data.as_deref().map(|d| d.as_slice()), Some(MONTSERRAT));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_first_resolves_share_one_lookup() {
        let source = ScriptedSource::new(CSS);
        let cache = Arc::new(FontCache::new(source.clone()));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.resolve(FontId::Lato).await })
            })
            .collect();
        let results: Vec<FontResolution> = futures::future::join_all(handles)
            .await
            .into_iter()
            .map(|r| r.expect("task"))
            .collect();

        assert_eq!(source.calls(), 1);
        assert!(results.iter().all(|r| r == &results[0]));
        assert!(results[0].registered);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let source = ScriptedSource::new("not css at all");
        let cache = FontCache::new(source.clone());

        let failed = cache.resolve(FontId::Roboto).await;
        assert!(!failed.registered);
        assert!(failed.faces.is_none());
        assert!(!cache.is_registered(FontId::Roboto));

        *source.css.lock().unwrap() = CSS.to_string();
        let retried = cache.resolve(FontId::Roboto).await;
        assert!(retried.registered);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn different_fonts_resolve_independently() {
        let source = ScriptedSource::new(CSS);
        let cache = FontCache::new(source.clone());
        let (a, b) = futures::join!(cache.resolve(FontId::Inter), cache.resolve(FontId::Raleway));
        assert!(a.registered && b.registered);
        assert_eq!(source.calls(), 2);
        assert_eq!(cache.registered_count(), 2);
    }

    #[tokio::test]
    async fn failed_downloads_drop_every_weight() {
        let source = Arc::new(ScriptedSource {
            describes: AtomicUsize::new(0),
            css: Mutex::new(CSS.to_string()),
            fail_files: true,
        });
        let cache = FontCache::new(source.clone());
        assert!(!cache.resolve(FontId::Inter).await.registered);

        let urls_only = FontCache::with_embedding(source, false);
        let res = urls_only.resolve(FontId::Inter).await;
        assert!(res.registered);
        assert!(res.faces.unwrap().faces.iter().all(|f| f.data.is_none()));
    }

    #[tokio::test]
    async fn unparseable_files_drop_their_weight() {
        let css = "@font-face { font-weight: 400; src: url(https://f/r.ttf); }\n@font-face { font-weight: 700; src: url(https://f/broken.ttf); }";
        let source = ScriptedSource::new(css);
        let cache = FontCache::new(source.clone());

        let res = cache.resolve(FontId::Inter).await;
        assert!(res.registered);
        let faces = res.faces.unwrap();
        assert_eq!(faces.faces.len(), 1);
        assert_eq!(faces.faces[0].weight, FontWeight::Regular);

        let only_broken = ScriptedSource::new("@font-face { font-weight: 400; src: url(https://f/broken.ttf); }");
        let cache = FontCache::new(only_broken);
        assert!(!cache.resolve(FontId::Lato).await.registered);
    }
}
