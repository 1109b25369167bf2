use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use lightfolio_core::{filter, Site};

pub fn list(site: &Site) -> Result<()> {
    if site.catalog().is_empty() {
        println!(
            "No images found under {}.",
            site.config().asset_root.display()
        );
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("ID"),
        Cell::new("Gallery"),
        Cell::new("Category"),
        Cell::new("Title"),
        Cell::new("Slug"),
        Cell::new("Thumb"),
    ]);

    for (config, sub) in site.galleries() {
        for item in sub.items().iter() {
            let thumb = if item.thumbnail == item.source { "-" } else { "yes" };
            table.add_row(vec![
                Cell::new(item.id),
                Cell::new(&config.id),
                Cell::new(&item.category),
                Cell::new(&item.title),
                Cell::new(&item.slug),
                Cell::new(thumb),
            ]);
        }
    }

    let placed: usize = site.galleries().map(|(_, sub)| sub.len()).sum();

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} items in {} galleries",
        site.catalog().len(),
        site.galleries().count()
    );
    if placed < site.catalog().len() {
        println!(
            "  {} items match no gallery rule",
            site.catalog().len() - placed
        );
    }
    println!();
    Ok(())
}

pub fn categories(site: &Site, gallery: &str) -> Result<()> {
    let sub = site.sub_catalog(gallery)?;
    let categories = filter::categories_of(sub.items(), &site.config().all_label);

    for category in &categories {
        let count = filter::apply_filter(sub.items(), category, &site.config().all_label).len();
        println!("{:<24} {:>5}", category, count);
    }
    Ok(())
}
