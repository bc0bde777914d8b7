use std::io;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use wiw::coords::{to_canvas, to_model};
use wiw::input::{GestureEvent, GestureKind, InputReconciler};
use wiw::persistence::{MemoryStorage, WorkspaceStorage};
use wiw::zoom::ZOOM_LEVELS;
use wiw::{CanvasRect, Store, WindowOptions};

#[derive(Parser, Debug)]
#[command(
    name = "wiw-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Replay a random gesture/keyboard workload against the workspace store"
)]
struct BenchCli {
    /// How long to run the benchmark.
    #[arg(
        short = 'd',
        long = "duration",
        value_name = "SECONDS",
        default_value_t = 5.0
    )]
    duration_seconds: f64,

    /// Number of windows kept open while the workload runs.
    #[arg(short = 'w', long = "windows", default_value_t = 24)]
    windows: usize,

    /// Save the workspace every N operations (0 disables saving).
    #[arg(long = "save-every", default_value_t = 64)]
    save_every: u64,

    /// PRNG seed. Defaults to the clock, so runs differ unless one is given.
    #[arg(long)]
    seed: Option<u64>,
}

struct BenchConfig {
    duration: Duration,
    windows: usize,
    save_every: u64,
    seed: u64,
}

impl TryFrom<&BenchCli> for BenchConfig {
    type Error = String;

    fn try_from(cli: &BenchCli) -> Result<Self, Self::Error> {
        if !(0.1..=600.0).contains(&cli.duration_seconds) {
            return Err("duration must be between 0.1 and 600 seconds".to_string());
        }
        if !(1..=1_000).contains(&cli.windows) {
            return Err("windows must be between 1 and 1000".to_string());
        }
        Ok(Self {
            duration: Duration::from_secs_f64(cli.duration_seconds),
            windows: cli.windows,
            save_every: cli.save_every,
            seed: cli.seed.unwrap_or_else(clock_seed),
        })
    }
}

fn main() -> io::Result<()> {
    let args = BenchCli::parse();
    let config = BenchConfig::try_from(&args)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;

    let stats = run_benchmark(&config)?;
    println!("{}", stats.final_report(&config));
    Ok(())
}

fn run_benchmark(config: &BenchConfig) -> io::Result<BenchStats> {
    let mut store = Store::new();
    let mut storage = WorkspaceStorage::new(MemoryStorage::new());
    let input = InputReconciler::default();
    let mut rng = Rng::new(config.seed);
    let mut stats = BenchStats::new();

    for i in 0..config.windows {
        let url = format!("site{i}.example");
        if store.add_window(&url, WindowOptions::default()).is_none() {
            return Err(io::Error::other(format!("could not open {url}")));
        }
    }

    while stats.elapsed() < config.duration {
        let op_start = Instant::now();
        let op = rng.below(6);
        let ids: Vec<_> = store.windows().iter().map(|w| w.id.clone()).collect();
        let Some(id) = ids.get(rng.below(ids.len() as u32) as usize).cloned() else {
            break;
        };
        let zoom = store.zoom();
        match op {
            0 | 1 => {
                let rect = CanvasRect::new(
                    rng.coord(1200.0),
                    rng.coord(900.0),
                    200.0 + rng.coord(400.0),
                    300.0 + rng.coord(600.0),
                );
                stats.record_drift(rect, zoom);
                let kind = if op == 0 {
                    GestureKind::DragStop(rect)
                } else {
                    GestureKind::ResizeStop(rect)
                };
                let start = GestureEvent::new(id.clone(), GestureKind::DragStart);
                input.handle_gesture(&mut store, &start);
                input.handle_gesture(&mut store, &GestureEvent::new(id, kind));
            }
            2 => {
                let down = GestureEvent::new(id, GestureKind::PointerDown);
                input.handle_gesture(&mut store, &down);
            }
            3 => {
                let key = match rng.below(3) {
                    0 => KeyEvent::new(KeyCode::Char('='), KeyModifiers::CONTROL),
                    1 => KeyEvent::new(KeyCode::Char('-'), KeyModifiers::CONTROL),
                    _ => KeyEvent::new(KeyCode::Char('0'), KeyModifiers::CONTROL),
                };
                input.handle_key(&mut store, &key);
            }
            4 => {
                store.set_selected_window(Some(id));
                let code = [KeyCode::Up, KeyCode::Down, KeyCode::Left, KeyCode::Right]
                    [rng.below(4) as usize];
                input.handle_key(&mut store, &KeyEvent::new(code, KeyModifiers::SHIFT));
            }
            _ => {
                store.remove_window(&id);
                let url = format!("reopen{}.example", stats.op_count);
                store.add_window(&url, WindowOptions::default());
            }
        }
        stats.op_count = stats.op_count.saturating_add(1);
        if config.save_every > 0 && stats.op_count % config.save_every == 0 {
            if store.save(&mut storage) {
                stats.saves = stats.saves.saturating_add(1);
            } else {
                stats.failed_saves = stats.failed_saves.saturating_add(1);
            }
        }
        stats.record_op(op_start.elapsed());
    }

    stats.final_max_z = store.max_z();
    stats.mark_completed();
    Ok(stats)
}

struct BenchStats {
    start: Instant,
    completed_at: Option<Instant>,
    op_count: u64,
    saves: u64,
    failed_saves: u64,
    total_op_time: Duration,
    slowest_op: Duration,
    max_drift: f64,
    final_max_z: i64,
}

impl BenchStats {
    fn new() -> Self {
        Self {
            start: Instant::now(),
            completed_at: None,
            op_count: 0,
            saves: 0,
            failed_saves: 0,
            total_op_time: Duration::ZERO,
            slowest_op: Duration::ZERO,
            max_drift: 0.0,
            final_max_z: 0,
        }
    }

    fn elapsed(&self) -> Duration {
        match self.completed_at {
            Some(done) => done.duration_since(self.start),
            None => self.start.elapsed(),
        }
    }

    fn mark_completed(&mut self) {
        self.completed_at = Some(Instant::now());
    }

    fn record_op(&mut self, took: Duration) {
        self.total_op_time += took;
        if took > self.slowest_op {
            self.slowest_op = took;
        }
    }

    /// Canvas to model and back at every ladder level.
    fn record_drift(&mut self, rect: CanvasRect, current: f64) {
        for zoom in ZOOM_LEVELS.iter().copied().chain([current]) {
            for v in [rect.x, rect.y, rect.width, rect.height] {
                let drift = (to_canvas(to_model(v, zoom), zoom) - v).abs();
                if drift > self.max_drift {
                    self.max_drift = drift;
                }
            }
        }
    }

    fn average_op_us(&self) -> f64 {
        if self.op_count == 0 {
            return 0.0;
        }
        (self.total_op_time.as_secs_f64() / self.op_count as f64) * 1_000_000.0
    }

    fn final_report(&self, config: &BenchConfig) -> String {
        let elapsed = self.elapsed().as_secs_f64();
        let ops_per_sec = if elapsed > 0.0 {
            self.op_count as f64 / elapsed
        } else {
            0.0
        };

        indoc::formatdoc!(
            r#"
            Workspace bench completed (seed {seed}).
            Duration: {elapsed:.2}s (target {target:.2}s) | Windows: {windows}
            Ops: {ops} (~{ops_per_sec:.0}/s) | Avg op: {avg:.2} us | Worst: {worst:.2} us
            Saves: {saves} ok, {failed} failed | Final max z: {max_z}
            Max canvas round-trip drift: {drift:e} px
            "#,
            seed = config.seed,
            elapsed = elapsed,
            target = config.duration.as_secs_f64(),
            windows = config.windows,
            ops = self.op_count,
            ops_per_sec = ops_per_sec,
            avg = self.average_op_us(),
            worst = self.slowest_op.as_secs_f64() * 1_000_000.0,
            saves = self.saves,
            failed = self.failed_saves,
            max_z = self.final_max_z,
            drift = self.max_drift,
        )
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
        ^ 0xA5A5_A5A5_1234_5678
}

struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }

    fn below(&mut self, n: u32) -> u32 {
        if n == 0 { 0 } else { self.next() % n }
    }

    /// Whole or half pixel in `[0, max)`.
    fn coord(&mut self, max: f64) -> f64 {
        let halves = (max * 2.0) as u32;
        f64::from(self.below(halves)) / 2.0
    }
}
