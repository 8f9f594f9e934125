use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use swipe_row::animation::Clock;
use swipe_row::{
    DragEvent, ItemData, RowBinding, RowOptions, RowSnapshot, RowState, SwipeRow, VisualParams,
};
use swipe_row_config::Config;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "swipe_row=debug";

/// Drives a list of swipe rows through a scripted gesture and prints every frame as JSON.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a KDL config file.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Frames per second of the simulated display.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=1000))]
    fps: u32,
    /// Identifier of the row that receives the gesture.
    #[arg(long, default_value_t = 2)]
    row: u64,
    #[arg(value_enum, default_value_t = Scenario::Delete)]
    scenario: Scenario,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Scenario {
    /// Short drag that snaps back to rest.
    SnapBack,
    /// Drag past half the threshold, settling revealed.
    Reveal,
    /// Drag far past the threshold and partially back.
    Overswipe,
    /// Reveal, then press delete.
    Delete,
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Drag(DragEvent),
    Delete,
    /// Keeps running frames until every row has stopped animating.
    WaitIdle,
}

impl Scenario {
    fn steps(self) -> Vec<Step> {
        let drag = |translations: &[f64]| {
            let mut steps = vec![Step::Drag(DragEvent::Begin)];
            steps.extend(
                translations
                    .iter()
                    .map(|&translation| Step::Drag(DragEvent::Update { translation })),
            );
            let translation = translations.last().copied().unwrap_or(0.);
            steps.push(Step::Drag(DragEvent::End { translation }));
            steps.push(Step::WaitIdle);
            steps
        };

        let ramp = |from: i32, to: i32, step: i32| -> Vec<f64> {
            let step = if from < to { step.abs() } else { -step.abs() };
            let mut values = Vec::new();
            let mut x = from;
            while (step < 0 && x >= to) || (step > 0 && x <= to) {
                values.push(f64::from(x));
                x += step;
            }
            values
        };

        match self {
            Scenario::SnapBack => drag(&ramp(-10, -50, 10)),
            Scenario::Reveal => drag(&ramp(-15, -150, 15)),
            Scenario::Overswipe => {
                let mut translations = ramp(-20, -300, 20);
                translations.extend(ramp(-280, -200, 20));
                drag(&translations)
            }
            Scenario::Delete => {
                let mut steps = Scenario::Reveal.steps();
                steps.push(Step::Delete);
                steps.push(Step::WaitIdle);
                steps
            }
        }
    }
}

#[derive(Serialize)]
struct FrameLine<'a> {
    frame: u64,
    time_ms: f64,
    rows: Vec<RowLine<'a>>,
}

#[derive(Serialize)]
struct RowLine<'a> {
    id: u64,
    label: &'a str,
    snapshot: RowSnapshot,
    visuals: VisualParams,
}

/// Owner of the rows; drops a row once it reports itself removed.
struct ItemList {
    rows: Vec<SwipeRow<ItemData>>,
    removals: async_channel::Receiver<u64>,
}

impl ItemList {
    fn new(items: Vec<ItemData>, options: RowOptions, clock: &Clock) -> Self {
        let (tx, removals) = async_channel::unbounded();

        let rows = items
            .into_iter()
            .map(|item| {
                let tx = tx.clone();
                let binding = RowBinding::new().on_remove(move |id| {
                    if tx.try_send(id).is_err() {
                        warn!("item list is gone, dropping removal of {id}");
                    }
                });
                SwipeRow::new(item, options, clock.clone(), binding)
            })
            .collect();

        Self { rows, removals }
    }

    fn row_mut(&mut self, id: u64) -> Option<&mut SwipeRow<ItemData>> {
        self.rows.iter_mut().find(|row| row.id() == id)
    }

    fn advance_animations(&mut self) {
        for row in &mut self.rows {
            row.advance_animations();
        }

        while let Ok(id) = self.removals.try_recv() {
            info!("removing item {id}");
            self.rows.retain(|row| row.id() != id);
        }
    }

    fn are_animations_ongoing(&self) -> bool {
        self.rows.iter().any(|row| row.are_animations_ongoing())
    }

    fn frame_line(&self, frame: u64, time: Duration) -> FrameLine<'_> {
        FrameLine {
            frame,
            time_ms: time.as_secs_f64() * 1000.,
            rows: self
                .rows
                .iter()
                .map(|row| RowLine {
                    id: row.id(),
                    label: &row.item().label,
                    snapshot: row.snapshot(),
                    visuals: row.visuals(),
                })
                .collect(),
        }
    }
}

fn stock_items() -> Vec<ItemData> {
    vec![
        ItemData {
            id: 1,
            label: String::from("Chicken Fried Rice"),
            amount: String::from("LKR 2,100.00"),
            quantity: 2,
        },
        ItemData {
            id: 2,
            label: String::from("Devilled Chicken(Boneless)"),
            amount: String::from("LKR 1,700.00"),
            quantity: 1,
        },
        ItemData {
            id: 4,
            label: String::from("Milk Shake"),
            amount: String::from("LKR 700.00"),
            quantity: 4,
        },
    ]
}

fn load_config(path: Option<&PathBuf>) -> Config {
    let Some(path) = path else {
        debug!("no config file given, using defaults");
        return Config::default();
    };

    match Config::load(path) {
        Ok(config) => config,
        Err(err) => {
            warn!("{err:?}");
            warn!("falling back to the default config");
            Config::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = load_config(cli.config.as_ref());
    let options = RowOptions::from_config(&config);

    let mut clock = Clock::with_time(Duration::ZERO);
    clock.configure(&config.animations);

    let mut list = ItemList::new(stock_items(), options, &clock);
    if list.row_mut(cli.row).is_none() {
        anyhow::bail!("no row with id {}", cli.row);
    }

    info!("running {:?} on row {} at {} fps", cli.scenario, cli.row, cli.fps);

    let frame_duration = Duration::from_secs(1) / cli.fps;
    let max_wait_frames = u64::from(cli.fps) * 30;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut now = Duration::ZERO;
    let mut frame = 0u64;

    let mut emit_frame = |list: &mut ItemList, now: &mut Duration, out: &mut io::StdoutLock| {
        *now += frame_duration;
        clock.set_unadjusted(*now);
        list.advance_animations();

        serde_json::to_writer(&mut *out, &list.frame_line(frame, *now))
            .context("error encoding frame")?;
        writeln!(out).context("error writing frame")?;
        frame += 1;
        anyhow::Ok(())
    };

    for step in cli.scenario.steps() {
        match step {
            Step::Drag(event) => {
                if let Some(row) = list.row_mut(cli.row) {
                    row.handle_drag_event(event);
                }
                emit_frame(&mut list, &mut now, &mut out)?;
            }
            Step::Delete => {
                if let Some(row) = list.row_mut(cli.row) {
                    if !row.commit() {
                        warn!("delete press ignored in {:?}", row.state());
                    }
                }
                emit_frame(&mut list, &mut now, &mut out)?;
            }
            Step::WaitIdle => {
                let mut waited = 0;
                while list.are_animations_ongoing() {
                    if waited == max_wait_frames {
                        warn!("animations still running after {waited} frames");
                        break;
                    }
                    emit_frame(&mut list, &mut now, &mut out)?;
                    waited += 1;
                }
            }
        }
    }

    out.flush().context("error flushing output")?;

    let remaining: Vec<_> = list.rows.iter().map(|row| row.id()).collect();
    match list.row_mut(cli.row).map(|row| row.state()) {
        Some(RowState::Idle) | None => info!("done, remaining rows: {remaining:?}"),
        Some(state) => warn!("row {} ended in {state:?}", cli.row),
    }

    Ok(())
}
