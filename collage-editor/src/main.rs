//! Scripted demo session: fetch a background, drop some emojis, run a
//! short selection tour, and print the resulting document.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use collage_core::{classify, Background, DropAction, DropPayload, ViewState, DEFAULT_EMOJI_SIZE};
use collage_editor::{
    CliArgs, DocumentController, EditorSnapshot, HttpFetcher, Intent, RasterDecoder,
};
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Screen center of the nominal 1280x720 surface the session pretends to
/// run on. Drop locations are spaced to its right.
const ORIGIN: (f64, f64) = (640.0, 360.0);

/// Spacing between scripted drop locations, in screen pixels.
const DROP_SPACING: f64 = 60.0;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "collage_editor=info,collage_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();
    run(args).await
}

async fn run(args: CliArgs) -> anyhow::Result<()> {
    let fetcher = HttpFetcher::with_deadline(Duration::from_millis(args.fetch_deadline_ms))
        .context("building HTTP fetcher")?;
    let controller = DocumentController::spawn(Arc::new(fetcher), Arc::new(RasterDecoder::new()));
    let mut snapshots = controller.subscribe();

    if let Some(url) = args.background.clone() {
        info!(%url, "setting background");
        controller.apply(Intent::SetBackground(Background::Url(url)));
        let snapshot = wait_until(&mut snapshots, |snapshot| {
            !snapshot.fetch_status.is_fetching()
        })
        .await?;
        if snapshot.background_image.is_none() {
            warn!("background did not produce an image, continuing without one");
        }
    }

    let view = ViewState::new();
    let placed = place_emojis(&controller, &view, &args.emojis);
    if placed > 0 {
        wait_until(&mut snapshots, |snapshot| {
            snapshot.document.emoji_count() == placed
        })
        .await?;
        selection_tour(&controller, &mut snapshots).await?;
    }

    let snapshot = controller.snapshot();
    info!(
        emojis = snapshot.document.emoji_count(),
        background = ?snapshot.document.background(),
        has_image = snapshot.background_image.is_some(),
        "session complete"
    );
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot.document)?);
    }
    Ok(())
}

/// Drop each glyph at a scripted screen location, gated by the same
/// classification a real drop surface would use. Returns how many were
/// accepted.
fn place_emojis(controller: &DocumentController, view: &ViewState, glyphs: &[String]) -> usize {
    let mut placed = 0;
    for (slot, glyph) in (0i32..).zip(glyphs) {
        let action = classify(DropPayload::Text(glyph.clone()), looks_like_emoji);
        if let Some(DropAction::AddEmoji { text }) = action {
            let drop_point = (ORIGIN.0 + f64::from(slot) * DROP_SPACING, ORIGIN.1);
            let (x, y) = view.point_to_model(drop_point, ORIGIN);
            let size = (DEFAULT_EMOJI_SIZE as f64 / view.zoom()) as i64;
            controller.apply(Intent::AddEmoji { text, x, y, size });
            placed += 1;
        } else {
            warn!(glyph = %glyph, "not recognized as an emoji, skipped");
        }
    }
    placed
}

/// Select the first emoji, grow it by half, nudge the selection, then
/// clear it.
async fn selection_tour(
    controller: &DocumentController,
    snapshots: &mut watch::Receiver<EditorSnapshot>,
) -> anyhow::Result<()> {
    let snapshot = controller.snapshot();
    let Some(first) = snapshot.document.emojis().next() else {
        return Ok(());
    };
    let id = first.id;
    let original_size = first.size;

    controller.apply(Intent::ToggleSelected(id));
    controller.apply(Intent::ScaleSelected { factor: 1.5 });
    controller.apply(Intent::MoveSelected { dx: 10, dy: -5 });
    controller.apply(Intent::DeselectAll);

    wait_until(snapshots, |snapshot| {
        !snapshot.document.any_selected()
            && snapshot
                .document
                .emoji(id)
                .is_some_and(|emoji| emoji.size != original_size)
    })
    .await?;
    Ok(())
}

/// Wait until a published snapshot satisfies `done`, starting from the
/// latest one already seen.
async fn wait_until(
    snapshots: &mut watch::Receiver<EditorSnapshot>,
    mut done: impl FnMut(&EditorSnapshot) -> bool,
) -> anyhow::Result<EditorSnapshot> {
    loop {
        {
            let current = snapshots.borrow_and_update();
            if done(&current) {
                return Ok(current.clone());
            }
        }
        snapshots.changed().await.context("controller stopped")?;
    }
}

/// Coarse scalar gate: the main pictograph blocks plus common symbol
/// ranges. Deliberately permissive, like the surface it stands in for.
fn looks_like_emoji(c: char) -> bool {
    matches!(
        u32::from(c),
        0x1F300..=0x1FAFF | 0x2600..=0x27BF | 0x2190..=0x21FF | 0x2B00..=0x2BFF | 0xFE0F
    )
}
