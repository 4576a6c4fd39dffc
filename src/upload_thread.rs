use std::sync::{mpsc, Arc};
use std::thread;

use tracing::{debug, error, info, warn};

use crate::app_types::{UploadJob, UploadUpdate};
use crate::share::{ShareError, ShareSession};
use crate::uploader::{Upload, UploadError};

/// Run one upload on a background thread.
///
/// The result goes back over `update_tx`; `wake` is called afterwards so the
/// UI thread notices it without waiting for the next input event.
pub fn spawn_upload<W>(
    uploader: Arc<dyn Upload>,
    job: UploadJob,
    update_tx: mpsc::Sender<UploadUpdate>,
    wake: W,
) -> std::io::Result<thread::JoinHandle<()>>
where
    W: Fn() + Send + 'static,
{
    thread::Builder::new()
        .name("upload".to_owned())
        .spawn(move || {
            profiling::scope!("upload_thread");
            info!(id = job.id, path = %job.path.display(), "upload started");

            let result = uploader.upload(&job.path);
            match &result {
                Ok(link) => debug!(id = job.id, link = %link, "upload succeeded"),
                Err(e) => warn!(id = job.id, error = %e, "upload failed"),
            }

            // receiver gone means the window closed; nothing left to tell
            if update_tx.send(UploadUpdate { id: job.id, result }).is_err() {
                debug!(id = job.id, "UI went away before upload finished");
                return;
            }
            wake();
        })
}

/// Join a finished upload thread and settle its upload in the session.
///
/// Results the thread queued are applied first. A thread that died without
/// reporting completes its upload with `UploadError::Interrupted`, so the
/// session never stays in `Uploading`. Returns the first QR failure, if any.
pub fn reap_upload(
    session: &mut ShareSession,
    (id, handle): (u64, thread::JoinHandle<()>),
    update_rx: &mpsc::Receiver<UploadUpdate>,
) -> Result<(), ShareError> {
    let panicked = handle.join().is_err();

    let mut outcome = Ok(());
    while let Ok(update) = update_rx.try_recv() {
        let completed = session.complete_upload(update);
        if outcome.is_ok() {
            outcome = completed;
        }
    }

    if panicked && session.in_flight() == Some(id) {
        error!(id, "upload thread panicked");
        let completed = session.complete_upload(UploadUpdate { id, result: Err(UploadError::Interrupted) });
        if outcome.is_ok() {
            outcome = completed;
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::share::ShareState;
    use crate::uploader::ShareLink;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    struct CannedUpload {
        link: Option<&'static str>,
        seen: Mutex<Vec<PathBuf>>,
    }

    impl Upload for CannedUpload {
        fn upload(&self, path: &Path) -> Result<ShareLink, UploadError> {
            self.seen.lock().unwrap().push(path.to_path_buf());
            match self.link {
                Some(link) => Ok(ShareLink::new(link).unwrap()),
                None => Err(UploadError::MissingLink),
            }
        }
    }

    struct PanickingUpload;

    impl Upload for PanickingUpload {
        fn upload(&self, _path: &Path) -> Result<ShareLink, UploadError> {
            panic!("connection handler blew up");
        }
    }

    #[test]
    fn test_panicked_thread_leaves_uploading() {
        let mut session = ShareSession::new();
        session.select_file(PathBuf::from("/tmp/report.pdf"));
        let job = session.begin_share().unwrap();
        let id = job.id;
        let (tx, rx) = mpsc::channel();

        let handle = spawn_upload(Arc::new(PanickingUpload), job, tx, || {}).unwrap();
        reap_upload(&mut session, (id, handle), &rx).unwrap();

        assert_eq!(session.state(), ShareState::FileSelected);
        assert!(!session.is_busy());
        assert!(session.can_share());
        assert_eq!(session.in_flight(), None);
        assert!(session.log().last().unwrap().starts_with("Upload error: upload thread stopped"));
    }

    #[test]
    fn test_reaped_thread_result_is_applied() {
        let mut session = ShareSession::new();
        session.select_file(PathBuf::from("/tmp/report.pdf"));
        let job = session.begin_share().unwrap();
        let id = job.id;
        let uploader = Arc::new(CannedUpload {
            link: Some("https://file.io/abc123"),
            seen: Mutex::new(Vec::new()),
        });
        let (tx, rx) = mpsc::channel();

        let handle = spawn_upload(uploader, job, tx, || {}).unwrap();
        reap_upload(&mut session, (id, handle), &rx).unwrap();

        assert_eq!(session.state(), ShareState::Shared);
        assert_eq!(session.link().unwrap().as_str(), "https://file.io/abc123");
        assert!(!session.log().iter().any(|l| l.starts_with("Upload error")));
    }

    #[test]
    fn test_result_is_posted_and_ui_woken() {
        let uploader = Arc::new(CannedUpload {
            link: Some("https://file.io/abc123"),
            seen: Mutex::new(Vec::new()),
        });
        let wakes = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = mpsc::channel();

        let wakes_in_thread = wakes.clone();
        let handle = spawn_upload(
            uploader.clone(),
            UploadJob { id: 7, path: PathBuf::from("/tmp/report.pdf") },
            tx,
            move || {
                wakes_in_thread.fetch_add(1, Ordering::SeqCst);
            },
        )
        .unwrap();
        handle.join().unwrap();

        let update = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(update.id, 7);
        assert_eq!(update.result.unwrap().as_str(), "https://file.io/abc123");
        assert_eq!(wakes.load(Ordering::SeqCst), 1);
        assert_eq!(*uploader.seen.lock().unwrap(), vec![PathBuf::from("/tmp/report.pdf")]);
    }

    #[test]
    fn test_failure_is_posted_too() {
        let uploader = Arc::new(CannedUpload { link: None, seen: Mutex::new(Vec::new()) });
        let (tx, rx) = mpsc::channel();

        spawn_upload(uploader, UploadJob { id: 1, path: PathBuf::from("a") }, tx, || {})
            .unwrap()
            .join()
            .unwrap();

        let update = rx.recv().unwrap();
        assert!(matches!(update.result, Err(UploadError::MissingLink)));
    }

    #[test]
    fn test_closed_receiver_skips_wake() {
        let uploader = Arc::new(CannedUpload { link: Some("https://x.y/z"), seen: Mutex::new(Vec::new()) });
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let wakes = Arc::new(AtomicUsize::new(0));
        let wakes_in_thread = wakes.clone();

        spawn_upload(uploader, UploadJob { id: 1, path: PathBuf::from("a") }, tx, move || {
            wakes_in_thread.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap()
        .join()
        .unwrap();

        assert_eq!(wakes.load(Ordering::SeqCst), 0);
    }
}
