use crate::engine::PointerEngine;
use crate::listing::{ListingNote, chart_to_listing};
use crate::model::chart::Chart;
use anyhow::bail;
use log::{debug, info, warn};
use spin_sleep::{SpinSleeper, SpinStrategy};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

pub const DEFAULT_GRID_SIZE: i32 = 625;
pub const DEFAULT_DELAY_S: f64 = 4.1;

const MAX_SLEEP_CHUNK_S: f64 = 0.050;

enum ControlMsg {
    Stop,
}

/// A centred square of 3x3 cells that grid coordinates are mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub start_x: i32,
    pub start_y: i32,
    pub cell_size: i32,
}

impl GridLayout {
    pub fn centered(screen_width: i32, screen_height: i32, grid_size: i32) -> Self {
        Self {
            start_x: screen_width / 2 - grid_size / 2,
            start_y: screen_height / 2 - grid_size / 2,
            cell_size: grid_size / 3,
        }
    }

    /// Screen position of the centre of cell `(col, row)`. Fractional cells are allowed.
    pub fn to_screen(&self, col: f64, row: f64) -> (i32, i32) {
        let cell = self.cell_size as f64;
        let x = self.start_x as f64 + col * cell + cell / 2.0;
        let y = self.start_y as f64 + row * cell + cell / 2.0;
        (x.round() as i32, y.round() as i32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledMove {
    pub time_ms: f64,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug)]
pub struct Player<E: PointerEngine> {
    delay: Duration,
    verbose: bool,
    layout: GridLayout,
    engine: Arc<E>,
    schedule: Mutex<Vec<ScheduledMove>>,
    control_tx: Mutex<Option<Sender<ControlMsg>>>,
    worker_handle: Mutex<Option<JoinHandle<()>>>,
}

impl<E: PointerEngine + 'static> Player<E> {
    pub fn new(engine: E, grid_size: i32, verbose: bool, delay: Duration) -> Self {
        let (width, height) = engine.screen_size();
        let layout = GridLayout::centered(width, height, grid_size);
        debug!(
            "Screen {}x{}, grid of {}px -> {:?}",
            width, height, grid_size, layout
        );

        Self {
            delay,
            verbose,
            layout,
            engine: Arc::new(engine),
            schedule: Mutex::new(Vec::new()),
            control_tx: Mutex::new(None),
            worker_handle: Mutex::new(None),
        }
    }

    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    pub fn load_chart(&self, chart: &Chart) -> anyhow::Result<()> {
        self.load_notes(&chart_to_listing(chart))
    }

    pub fn load_notes(&self, notes: &[ListingNote]) -> anyhow::Result<()> {
        let mut moves: Vec<ScheduledMove> = Vec::with_capacity(notes.len());

        for note in notes {
            if !(note.x.is_finite() && note.y.is_finite() && note.time_ms.is_finite()) {
                warn!("Skipping non-finite note {:?}..!", note);
                continue;
            }

            let (x, y) = self.layout.to_screen(note.x, note.y);
            moves.push(ScheduledMove {
                time_ms: note.time_ms,
                x,
                y,
            });
        }

        moves.sort_by(|a, b| a.time_ms.total_cmp(&b.time_ms));

        let Ok(mut schedule_lock) = self.schedule.lock() else {
            bail!("Failed to lock the schedule..!");
        };
        *schedule_lock = moves;

        info!("Loaded {} scheduled pointer moves..!", schedule_lock.len());

        Ok(())
    }

    pub fn scheduled(&self) -> anyhow::Result<Vec<ScheduledMove>> {
        let Ok(schedule) = self.schedule.lock() else {
            bail!("Failed to lock schedule..!")
        };
        Ok(schedule.clone())
    }

    /// Starts playback on a worker thread. With `join`, blocks until it finishes or is stopped.
    pub fn play(&self, join: bool) -> anyhow::Result<()> {
        {
            let Ok(mut guard) = self.worker_handle.lock() else {
                bail!("Failed to lock worker handle..!")
            };

            match guard.take() {
                Some(handle) if handle.is_finished() => {
                    let _ = handle.join();
                }
                Some(handle) => {
                    *guard = Some(handle);
                    bail!("Playback already running..!")
                }
                None => {}
            }
        }

        let schedule = self.scheduled()?;
        if schedule.is_empty() {
            bail!("No notes loaded..!")
        }

        let engine = Arc::clone(&self.engine);
        let (tx, rx) = mpsc::channel::<ControlMsg>();

        {
            let Ok(mut ctl) = self.control_tx.lock() else {
                bail!("Failed to lock control_tx..!")
            };

            *ctl = Some(tx);
        }

        let delay = self.delay;
        let verbose = self.verbose;
        let handle = thread::spawn(move || {
            engine.prepare_playback_thread();
            run_schedule(engine.as_ref(), &schedule, &rx, delay, verbose);
        });

        if join {
            if handle.join().is_err() {
                warn!("Playback thread panicked..!");
            }

            let Ok(mut ctl) = self.control_tx.lock() else {
                bail!("Failed to lock control_tx..!")
            };
            *ctl = None;
        } else {
            let Ok(mut wh) = self.worker_handle.lock() else {
                bail!("Failed to lock worker handle..!")
            };

            *wh = Some(handle);
        }

        Ok(())
    }

    pub fn stop(&self) -> anyhow::Result<()> {
        let tx = {
            let Ok(mut lock) = self.control_tx.lock() else {
                bail!("Failed to lock control_tx..!")
            };
            lock.take()
        };

        if let Some(tx) = tx {
            let _ = tx.send(ControlMsg::Stop);
        } else {
            bail!("No worker is running playback..!")
        }

        let Ok(mut lock) = self.worker_handle.lock() else {
            bail!("Failed to lock worker_handle..!")
        };

        if let Some(handle) = lock.take() {
            let _ = handle.join();
            debug!("Playback thread joined..!");
            info!("Stopped playback thread..!");
        }

        Ok(())
    }
}

/// Sleeps until `target` in short chunks. Returns `false` if a stop arrived first.
fn wait_until(target: Instant, rx: &Receiver<ControlMsg>, sleeper: &SpinSleeper) -> bool {
    loop {
        if rx.try_recv().is_ok() {
            return false;
        }

        let now = Instant::now();
        if now >= target {
            return true;
        }

        let remaining = (target - now).as_secs_f64();
        sleeper.sleep(Duration::from_secs_f64(remaining.min(MAX_SLEEP_CHUNK_S)));
    }
}

fn run_schedule<E: PointerEngine + ?Sized>(
    engine: &E,
    schedule: &[ScheduledMove],
    rx: &Receiver<ControlMsg>,
    delay: Duration,
    verbose: bool,
) {
    let sleeper = SpinSleeper::new(100_000).with_spin_strategy(SpinStrategy::YieldThread);

    info!(
        "Starting playback {}..!",
        if delay.is_zero() {
            "now".to_owned()
        } else {
            format!("in {:.2} seconds", delay.as_secs_f64())
        }
    );

    if !wait_until(Instant::now() + delay, rx, &sleeper) {
        warn!("Playback stopped during the start delay..!");
        return;
    }

    let start = Instant::now();

    for event in schedule {
        // negative timestamps fire immediately
        let Some(target) = Duration::try_from_secs_f64(event.time_ms.max(0.0) / 1000.0)
            .ok()
            .and_then(|offset| start.checked_add(offset))
        else {
            warn!(
                "Note at {}ms is too far in the future, ending playback..!",
                event.time_ms
            );
            return;
        };

        if !wait_until(target, rx, &sleeper) {
            warn!(
                "Playback stopped via control message after {} seconds..!",
                start.elapsed().as_secs()
            );
            return;
        }

        let emitted_at_ms = start.elapsed().as_secs_f64() * 1000.0;
        if verbose {
            info!(
                "Pointer -> ({:>5}, {:>5}) | at {:>13.3}ms | scheduled for: {:>13.3}ms",
                event.x, event.y, emitted_at_ms, event.time_ms
            );
        }

        if let Err(why) = engine.move_to(event.x, event.y) {
            warn!(
                "Input error at {:.3}ms for ({}, {}) | why: {:?}",
                emitted_at_ms, event.x, event.y, why
            );
        }
    }

    info!("Playback thread finished all events..!");
}
