use std::path::PathBuf;

use crossbeam_channel::{Receiver, unbounded};

/// Watches `path` on a background thread; each change sends a unit.
pub fn watch_file(path: PathBuf) -> Receiver<()> {
    let (tx, rx) = unbounded::<()>();
    std::thread::spawn(move || {
        use notify::{EventKind, RecursiveMode, Watcher};
        let watcher = notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
            if let Ok(event) = res {
                match event.kind {
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Any => {
                        let _ = tx.send(());
                    }
                    _ => {}
                }
            }
        });
        let mut watcher = match watcher {
            Ok(w) => w,
            Err(e) => {
                log::warn!(target: "dynlights::config", "file watcher unavailable: {}", e);
                return;
            }
        };
        if let Err(e) = watcher.watch(path.as_path(), RecursiveMode::NonRecursive) {
            log::warn!(target: "dynlights::config", "cannot watch {}: {}", path.display(), e);
            return;
        }
        loop {
            std::thread::sleep(std::time::Duration::from_secs(3600));
        }
    });
    rx
}
