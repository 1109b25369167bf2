use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use lightfolio_core::enrich::ExifCaptionSource;
use lightfolio_core::gate::GateOutcome;
use lightfolio_core::{deeplink, Gallery, Site, Slide, Viewer};

pub struct BrowseArgs {
    pub gallery: Option<String>,
    pub filter: Option<String>,
    pub scroll: usize,
    pub link: Option<String>,
    pub enrich: bool,
    pub password: Option<String>,
}

/// Stand-in lightbox: remembers the slide list and reports what it is asked to open.
#[derive(Default)]
struct ConsoleViewer {
    slides: Vec<Slide>,
}

impl Viewer for ConsoleViewer {
    fn refresh(&mut self, slides: &[Slide]) {
        self.slides = slides.to_vec();
    }

    fn open(&mut self, index: usize, slug: &str) {
        match self.slides.get(index).filter(|slide| slide.slug == slug) {
            Some(slide) => println!(
                "  Lightbox open on #{} \"{}\" ({})",
                index + 1,
                slide.display_title,
                slide.category_label
            ),
            None => println!("  Lightbox asked for missing slide \"{slug}\""),
        }
    }
}

pub fn run(site: &mut Site, args: BrowseArgs) -> Result<()> {
    if let Some(password) = &args.password {
        match site.unlock(password) {
            GateOutcome::Rejected => match site.gate().and_then(|g| g.error()) {
                Some(message) => println!("  {message}"),
                None => println!("  No password is configured; private galleries stay locked."),
            },
            GateOutcome::Unlocked => println!("  Private galleries unlocked."),
            GateOutcome::AlreadyUnlocked => {}
        }
    }

    let id = match args.gallery {
        Some(id) => id,
        None => site.initial_gallery(args.link.as_deref()).to_string(),
    };
    let mut gallery = site.gallery::<ConsoleViewer>(&id, Arc::new(ExifCaptionSource))?;

    gallery.mount(args.link.as_deref());
    gallery.attach_viewer(ConsoleViewer::default());

    if let Some(filter) = &args.filter {
        gallery.set_filter(filter);
    }
    for _ in 0..args.scroll {
        gallery.sentinel_visibility(true);
        gallery.sentinel_visibility(false);
    }
    if args.enrich {
        enrich_visible(&mut gallery);
    }

    print_grid(&mut gallery);
    Ok(())
}

fn enrich_visible(gallery: &mut Gallery<ConsoleViewer>) {
    let visible = gallery.visible_items();
    let requested = visible
        .iter()
        .filter(|item| gallery.image_decoded(item.id))
        .count();

    let pb = ProgressBar::new(requested as u64);
    pb.set_style(
        ProgressStyle::with_template("  {spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );
    pb.set_message("Reading captions...");

    let mut changed = 0;
    while gallery.enrichment_in_flight() > 0 {
        changed += gallery.poll_enrichment();
        pb.set_position((requested - gallery.enrichment_in_flight()) as u64);
        std::thread::sleep(Duration::from_millis(20));
    }
    changed += gallery.poll_enrichment();
    pb.finish_with_message(format!("{changed} titles from embedded captions"));
}

fn print_grid(gallery: &mut Gallery<ConsoleViewer>) {
    let view = gallery.render();

    let strip: Vec<String> = view
        .categories
        .iter()
        .map(|c| {
            if *c == view.active_filter {
                format!("[{c}]")
            } else {
                c.clone()
            }
        })
        .collect();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("#"),
        Cell::new("Title"),
        Cell::new("Category"),
        Cell::new("Link"),
    ]);
    for (index, item) in view.items.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&item.title),
            Cell::new(&item.category),
            Cell::new(deeplink::fragment_for(gallery.id(), &item.slug)),
        ]);
    }

    println!();
    println!("  {}", gallery.id());
    println!("  {}", strip.join("  "));
    println!("{table}");
    println!();
    if view.has_more {
        println!(
            "  Showing {} of {} (scroll for more)",
            view.items.len(),
            view.filtered_len
        );
    } else {
        println!("  Showing all {}", view.filtered_len);
    }
    println!();
}
