use crate::error::Result;
use crate::lrc::LrcFile;
use crate::media::MediaKind;
use crate::playback::PlaybackState;
use crate::time::DurationExt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info};

/// Events emitted by the application store
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// A new audio file was selected
    AudioSelected { path: PathBuf, source_url: String },
    /// A lyric file was parsed and its store replaced wholesale
    LyricsLoaded { lyrics: LrcFile },
    /// The lyric selection was cleared
    LyricsCleared,
    /// Playback was paused
    Paused { position: Duration },
    /// Playback was resumed
    Resumed { position: Duration },
    /// A seek occurred within the current track
    Seeked { position: Duration },
    /// Regular playback position update
    PositionChanged { position: Duration },
    /// The player reported the track duration
    DurationChanged { duration: Duration },
    /// The highlighted lyric line changed
    LineChanged { index: Option<usize> },
}

struct AppStoreInner {
    audio_path: Option<PathBuf>,
    lyrics_path: Option<PathBuf>,
    lyrics: Option<LrcFile>,
    current_line: Option<usize>,
    playback: PlaybackState,
}

/// Application state container.
///
/// Holds the selected files, the parsed lyric store derived from them, and
/// the playback transport state. All writes go through the file-selection
/// and playback-event methods; everything else observes the store through
/// snapshots or the [`StoreEvent`] subscription. Derived state is replaced
/// wholesale under the write lock, so readers never observe a partial
/// update.
pub struct AppStore {
    inner: RwLock<AppStoreInner>,
    event_tx: broadcast::Sender<StoreEvent>,
    seek_threshold: Duration,
}

impl AppStore {
    /// Create a new store with the given seek-detection threshold.
    #[must_use]
    pub fn new(seek_threshold: Duration) -> Arc<Self> {
        let (event_tx, _) = broadcast::channel(64);

        Arc::new(Self {
            inner: RwLock::new(AppStoreInner {
                audio_path: None,
                lyrics_path: None,
                lyrics: None,
                current_line: None,
                playback: PlaybackState::default(),
            }),
            event_tx,
            seek_threshold,
        })
    }

    /// Subscribe to store events
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.event_tx.subscribe()
    }

    /// Select a new audio file.
    ///
    /// Replaces the audio reference and resets the playback transport to its
    /// initial values (paused, position zero, duration unknown). The lyric
    /// selection is untouched; the highlighted line is cleared because the
    /// old position no longer applies.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedFile`](crate::LrcViewError::UnsupportedFile) for
    /// a non-audio extension; the store is left untouched.
    pub async fn select_audio(&self, path: &Path) -> Result<()> {
        MediaKind::Audio.validate(path)?;

        let source_url = format!("file://{}", path.display());
        let mut inner = self.inner.write().await;
        inner.audio_path = Some(path.to_path_buf());
        inner.current_line = None;
        inner.playback = PlaybackState {
            source_url: Some(source_url.clone()),
            ..Default::default()
        };

        info!(path = %path.display(), "audio file selected");
        let _ = self.event_tx.send(StoreEvent::AudioSelected {
            path: path.to_path_buf(),
            source_url,
        });
        Ok(())
    }

    /// Select a new lyric file.
    ///
    /// Reads and parses the file, then replaces the derived lyric store
    /// wholesale and resets the highlighted line. Validation, the read, and
    /// the parse all happen before any state is mutated, so every failure
    /// leaves the previous store intact.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedFile`](crate::LrcViewError::UnsupportedFile) for
    /// a non-`.lrc` extension, an IO error if the file cannot be read, or
    /// [`NoSyncedLines`](crate::LrcViewError::NoSyncedLines) when parsing
    /// finds no timed lyric line.
    pub async fn select_lyrics(&self, path: &Path) -> Result<()> {
        MediaKind::Lyrics.validate(path)?;

        let content = fs::read_to_string(path)?;
        let lyrics = LrcFile::parse(&content)?;

        info!(
            path = %path.display(),
            lines = lyrics.lines.len(),
            skipped = lyrics.warnings.len(),
            "lyric file loaded"
        );

        let mut inner = self.inner.write().await;
        inner.lyrics_path = Some(path.to_path_buf());
        inner.lyrics = Some(lyrics.clone());
        inner.current_line = None;

        let _ = self.event_tx.send(StoreEvent::LyricsLoaded { lyrics });
        Ok(())
    }

    /// Clear the lyric selection and discard the derived store.
    pub async fn clear_lyrics(&self) {
        let mut inner = self.inner.write().await;
        inner.lyrics_path = None;
        inner.lyrics = None;
        inner.current_line = None;

        let _ = self.event_tx.send(StoreEvent::LyricsCleared);
    }

    /// Handle a position update from the player.
    ///
    /// Emits [`StoreEvent::Seeked`] when the position jumped beyond the
    /// seek threshold, a plain [`StoreEvent::PositionChanged`] otherwise,
    /// and [`StoreEvent::LineChanged`] whenever the highlighted line index
    /// moved.
    pub async fn update_position(&self, position: Duration) {
        let mut inner = self.inner.write().await;

        let seeked = inner.playback.seek_occurred(position, self.seek_threshold);
        inner.playback.position = position;
        inner.playback.updated_at = Instant::now();

        if seeked {
            debug!(position = %position.mmss(), "seek detected");
            let _ = self.event_tx.send(StoreEvent::Seeked { position });
        } else {
            let _ = self.event_tx.send(StoreEvent::PositionChanged { position });
        }

        let index = inner
            .lyrics
            .as_ref()
            .and_then(|lrc| lrc.line_index_at(position));
        if index != inner.current_line {
            inner.current_line = index;
            debug!(?index, position = %position.mmss(), "active lyric line changed");
            let _ = self.event_tx.send(StoreEvent::LineChanged { index });
        }
    }

    /// Handle the player reporting the track duration.
    pub async fn set_duration(&self, duration: Duration) {
        self.inner.write().await.playback.duration = Some(duration);
        let _ = self.event_tx.send(StoreEvent::DurationChanged { duration });
    }

    /// Handle a pause/resume toggle from the player.
    pub async fn set_paused(&self, paused: bool) {
        let mut inner = self.inner.write().await;
        if inner.playback.is_paused == paused {
            return;
        }
        inner.playback.is_paused = paused;
        inner.playback.updated_at = Instant::now();

        let position = inner.playback.position;
        let event = if paused {
            StoreEvent::Paused { position }
        } else {
            StoreEvent::Resumed { position }
        };
        let _ = self.event_tx.send(event);
    }

    /// Get the selected audio file path
    pub async fn audio_path(&self) -> Option<PathBuf> {
        self.inner.read().await.audio_path.clone()
    }

    /// Get the selected lyric file path (read-only view)
    pub async fn lyrics_path(&self) -> Option<PathBuf> {
        self.inner.read().await.lyrics_path.clone()
    }

    /// Get the current parsed lyric store
    pub async fn lyrics(&self) -> Option<LrcFile> {
        self.inner.read().await.lyrics.clone()
    }

    /// Get the index of the currently highlighted line
    pub async fn current_line(&self) -> Option<usize> {
        self.inner.read().await.current_line
    }

    /// Get a snapshot of the playback transport state
    pub async fn playback(&self) -> PlaybackState {
        self.inner.read().await.playback.clone()
    }

    /// Get interpolated current position
    pub async fn current_position(&self) -> Duration {
        self.inner.read().await.playback.interpolated_position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LrcViewError;
    use std::io::Write;

    const SEEK_THRESHOLD: Duration = Duration::from_secs(2);

    fn write_temp_lrc(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[tokio::test]
    async fn test_select_lyrics_replaces_store() {
        let store = AppStore::new(SEEK_THRESHOLD);
        let path = write_temp_lrc(
            "lrcview_test_first.lrc",
            "[00:01.00]Hello\n[00:05.00]World",
        );

        store.select_lyrics(&path).await.unwrap();
        assert_eq!(store.lyrics().await.unwrap().lines.len(), 2);
        assert_eq!(store.lyrics_path().await, Some(path));

        // Advance into the second line
        store.update_position(Duration::from_secs(6)).await;
        assert_eq!(store.current_line().await, Some(1));

        // Replacing the lyric file discards the prior store and resets the line
        let replacement = write_temp_lrc("lrcview_test_second.lrc", "[00:30.00]Other song");
        store.select_lyrics(&replacement).await.unwrap();
        assert_eq!(store.current_line().await, None);
        assert_eq!(store.lyrics().await.unwrap().lines.len(), 1);
    }

    #[tokio::test]
    async fn test_select_lyrics_wrong_extension_keeps_state() {
        let store = AppStore::new(SEEK_THRESHOLD);
        let good = write_temp_lrc("lrcview_test_good.lrc", "[00:01.00]Line");
        store.select_lyrics(&good).await.unwrap();

        let err = store
            .select_lyrics(Path::new("song.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, LrcViewError::UnsupportedFile { .. }));

        // Previous valid state untouched
        assert_eq!(store.lyrics_path().await, Some(good));
        assert!(store.lyrics().await.is_some());
    }

    #[tokio::test]
    async fn test_select_lyrics_unreadable_file() {
        let store = AppStore::new(SEEK_THRESHOLD);
        let err = store
            .select_lyrics(Path::new("/nonexistent/lrcview.lrc"))
            .await
            .unwrap_err();
        assert!(matches!(err, LrcViewError::IoError(_)));
        assert!(store.lyrics().await.is_none());
    }

    #[tokio::test]
    async fn test_select_audio_resets_transport() {
        let store = AppStore::new(SEEK_THRESHOLD);
        store.update_position(Duration::from_secs(42)).await;
        store.set_paused(false).await;

        store.select_audio(Path::new("track.mp3")).await.unwrap();

        let playback = store.playback().await;
        assert!(playback.is_paused);
        assert_eq!(playback.position, Duration::ZERO);
        assert!(playback.duration.is_none());
        assert_eq!(
            playback.source_url.as_deref(),
            Some("file://track.mp3")
        );
    }

    #[tokio::test]
    async fn test_select_audio_wrong_extension() {
        let store = AppStore::new(SEEK_THRESHOLD);
        let err = store
            .select_audio(Path::new("lyrics.lrc"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LrcViewError::UnsupportedFile { slot: "audio", .. }
        ));
        assert!(store.audio_path().await.is_none());
    }

    #[tokio::test]
    async fn test_line_changed_events() {
        let store = AppStore::new(SEEK_THRESHOLD);
        let path = write_temp_lrc(
            "lrcview_test_events.lrc",
            "[00:01.00]A\n[00:05.00]B\n[00:10.00]C",
        );
        store.select_lyrics(&path).await.unwrap();

        let mut rx = store.subscribe();

        store.update_position(Duration::from_millis(500)).await;
        assert_eq!(store.current_line().await, None);

        store.update_position(Duration::from_secs(5)).await;
        assert_eq!(store.current_line().await, Some(1));

        // Consume events until the line change shows up
        let mut saw_line_change = false;
        while let Ok(event) = rx.try_recv() {
            if let StoreEvent::LineChanged { index } = event {
                assert_eq!(index, Some(1));
                saw_line_change = true;
            }
        }
        assert!(saw_line_change);
    }

    #[tokio::test]
    async fn test_seek_event() {
        let store = AppStore::new(SEEK_THRESHOLD);
        store.update_position(Duration::from_secs(10)).await;

        let mut rx = store.subscribe();
        store.update_position(Duration::from_secs(60)).await;

        let event = rx.try_recv().unwrap();
        assert!(matches!(
            event,
            StoreEvent::Seeked { position } if position == Duration::from_secs(60)
        ));
    }

    #[tokio::test]
    async fn test_pause_resume_events() {
        let store = AppStore::new(SEEK_THRESHOLD);
        let mut rx = store.subscribe();

        store.set_paused(false).await;
        assert!(matches!(rx.try_recv().unwrap(), StoreEvent::Resumed { .. }));

        // No event when the flag does not change
        store.set_paused(false).await;
        assert!(rx.try_recv().is_err());

        store.set_paused(true).await;
        assert!(matches!(rx.try_recv().unwrap(), StoreEvent::Paused { .. }));
    }

    #[tokio::test]
    async fn test_clear_lyrics() {
        let store = AppStore::new(SEEK_THRESHOLD);
        let path = write_temp_lrc("lrcview_test_clear.lrc", "[00:01.00]Line");
        store.select_lyrics(&path).await.unwrap();
        store.update_position(Duration::from_secs(2)).await;
        assert_eq!(store.current_line().await, Some(0));

        store.clear_lyrics().await;
        assert!(store.lyrics().await.is_none());
        assert!(store.lyrics_path().await.is_none());
        assert_eq!(store.current_line().await, None);
    }
}
