mod beep;

pub use beep::AlarmBeep;

use rodio::{OutputStream, Sink};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc::{self, Sender},
    Arc, Mutex,
};
use std::thread;

enum AlarmCommand {
    Ring,
    Stop,
}

/// Handle to the alarm tone generator. The output device is optional: every
/// error is a plain `String` the caller may log and ignore, and a missing
/// device never affects timer state.
#[derive(Clone)]
pub struct AlarmHandle {
    tx: Arc<Mutex<Option<Sender<AlarmCommand>>>>,
    is_ringing: Arc<AtomicBool>,
}

impl AlarmHandle {
    pub fn new() -> Self {
        Self {
            tx: Arc::new(Mutex::new(None)),
            is_ringing: Arc::new(AtomicBool::new(false)),
        }
    }

    fn ensure_thread(&self) -> Result<Sender<AlarmCommand>, String> {
        if let Some(tx) = self.tx.lock().map_err(|e| e.to_string())?.as_ref() {
            return Ok(tx.clone());
        }

        let (tx, rx) = mpsc::channel::<AlarmCommand>();

        // Spawn dedicated audio thread holding non-Send audio objects
        thread::Builder::new()
            .name("audio-engine".to_string())
            .spawn(move || {
                let mut _stream: Option<OutputStream> = None;
                let mut sink: Option<Sink> = None;

                fn ensure_sink(
                    stream: &mut Option<OutputStream>,
                    sink: &mut Option<Sink>,
                ) -> Result<(), String> {
                    if sink.is_none() {
                        let (s, handle) = OutputStream::try_default()
                            .map_err(|e| format!("Failed to create audio output stream: {}", e))?;
                        let new_sink = Sink::try_new(&handle)
                            .map_err(|e| format!("Failed to create audio sink: {}", e))?;
                        *stream = Some(s);
                        *sink = Some(new_sink);
                    }
                    Ok(())
                }

                while let Ok(cmd) = rx.recv() {
                    match cmd {
                        AlarmCommand::Ring => {
                            // Stop any existing tone before starting a new one
                            if let Some(s_old) = sink.take() {
                                s_old.stop();
                            }
                            _stream = None;
                            let _ = ensure_sink(&mut _stream, &mut sink);
                            if let Some(ref s) = sink {
                                s.append(AlarmBeep::new());
                                s.play();
                            }
                        }
                        AlarmCommand::Stop => {
                            if let Some(s_old) = sink.take() {
                                s_old.stop();
                            }
                            _stream = None;
                        }
                    }
                }
            })
            .map_err(|e| e.to_string())?;

        let tx_clone = tx.clone();
        *self.tx.lock().map_err(|e| e.to_string())? = Some(tx);
        Ok(tx_clone)
    }

    pub fn ring(&self) -> Result<(), String> {
        let tx = self.ensure_thread()?;
        tx.send(AlarmCommand::Ring).map_err(|e| e.to_string())?;
        self.is_ringing.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Idempotent: stopping an alarm that is not ringing is fine.
    pub fn stop(&self) -> Result<(), String> {
        if let Ok(Some(tx)) = self.tx.lock().map(|g| g.clone()) {
            let _ = tx.send(AlarmCommand::Stop);
        }
        self.is_ringing.store(false, Ordering::SeqCst);
        Ok(())
    }

    pub fn is_ringing(&self) -> bool {
        self.is_ringing.load(Ordering::SeqCst)
    }
}

impl Default for AlarmHandle {
    fn default() -> Self {
        Self::new()
    }
}
