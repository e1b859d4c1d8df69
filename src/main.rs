use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use edgecalc::config;
use edgecalc::export;
use edgecalc::posta::{PostaQuote, POSTA_TERMS};
use edgecalc::utils::{format_money, parse_flag};
use edgecalc::{
    Catalog, ConfigurationDraft, Estimate, FileStore, Notice, NoticeLevel, ServiceType,
    SummaryItem,
};

#[derive(Parser)]
#[command(
    name = "edgecalc",
    author,
    version,
    about = "WorldPosta CloudEdge price estimator",
    long_about = r#"edgecalc - build and price CloudEdge estimates from the terminal.

Configurations are kept in a named slot (a JSON file in the data directory) and every
command that changes the estimate saves it back. Set EDGECALC_DATA_DIR, EDGECALC_SLOT,
EDGECALC_CATALOG_FILE and EDGECALC_CURRENCY in the environment or a .env file.

Examples:
  1) Add a medium instance in Frankfurt on a yearly term:
      edgecalc add --template wp-gen-m1 --region wp-eu-central-1 --term yearly
  2) Show the estimate and its grand total:
      edgecalc list
  3) Price a configuration without storing it:
      edgecalc quote --type vdc --resource cores=16 --resource ram=64
"#,
    after_help = "Use `edgecalc <subcommand> --help` to get subcommand specific options."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Path to .env file
    #[arg(long, global = true)]
    env_file: Option<String>,
    /// Estimate slot to work on (overrides EDGECALC_SLOT)
    #[arg(long, global = true)]
    slot: Option<String>,
    /// Answer yes to confirmation prompts
    #[arg(long, short = 'y', global = true)]
    yes: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the price catalog
    #[command(about = "Show catalog entries", long_about = "Print one section of the price catalog (resources, regions, boot disks, provisioning models, operating systems, GPUs, templates, terms, add-ons).")]
    Catalog {
        #[arg(value_enum)]
        kind: CatalogKind,
    },
    /// List the configurations of the estimate
    List,
    /// Show one configuration in detail
    Show { id: String },
    /// Add a configuration
    #[command(about = "Add a configuration", long_about = "Add a configuration to the estimate. Unspecified options use the catalog defaults; an instance starts from the first template.")]
    Add {
        #[command(flatten)]
        edit: EditArgs,
    },
    /// Change an existing configuration
    Edit {
        id: String,
        #[command(flatten)]
        edit: EditArgs,
    },
    /// Append a copy of a configuration
    Duplicate { id: String },
    /// Remove a configuration
    Remove { id: String },
    /// Remove every configuration and the saved slot
    Clear,
    /// Copy the estimate into another slot
    Save { target: String },
    /// Replace the estimate with the contents of another slot
    Load { source: String },
    /// Export the estimate
    Export {
        #[command(subcommand)]
        format: ExportFormat,
    },
    /// Price a configuration without adding it
    Quote {
        #[command(flatten)]
        edit: EditArgs,
    },
    /// Price Posta mail plans
    #[command(about = "Price Posta mail plans", long_about = "Price Posta plans given as PLAN:QTY[:TERM][:rules], e.g. `--plan posta-standard:3:yearly:rules`.")]
    Posta {
        #[arg(long = "plan", value_name = "PLAN:QTY[:TERM][:rules]")]
        plans: Vec<String>,
    },
}

#[derive(Subcommand)]
enum ExportFormat {
    /// Write the estimate as CSV
    Csv {
        /// Output file (defaults to the standard estimate file name)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
        /// Print to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,
    },
    /// Print the e-mail body, or a mailto link with --link
    Email {
        #[arg(long)]
        link: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CatalogKind {
    Resources,
    Regions,
    Disks,
    Models,
    Os,
    Gpus,
    Templates,
    Terms,
    Addons,
}

#[derive(Args, Default)]
struct EditArgs {
    /// Display name
    #[arg(long)]
    name: Option<String>,
    /// Service type: instance or vdc
    #[arg(long = "type", value_name = "TYPE")]
    service_type: Option<String>,
    /// Instance template id
    #[arg(long)]
    template: Option<String>,
    /// Resource quantity as ID=VALUE (repeatable)
    #[arg(long = "resource", value_name = "ID=VALUE")]
    resources: Vec<String>,
    /// Number of identical units
    #[arg(long)]
    quantity: Option<String>,
    #[arg(long)]
    region: Option<String>,
    /// Commitment term id
    #[arg(long)]
    term: Option<String>,
    /// Operating system id
    #[arg(long)]
    os: Option<String>,
    /// Provisioning model id
    #[arg(long)]
    provisioning: Option<String>,
    #[arg(long = "boot-disk")]
    boot_disk: Option<String>,
    /// Enable GPUs (on/off)
    #[arg(long)]
    gpus: Option<String>,
    #[arg(long = "gpu-type")]
    gpu_type: Option<String>,
    #[arg(long = "gpu-count")]
    gpu_count: Option<i64>,
    /// Select an add-on (repeatable)
    #[arg(long = "addon")]
    addons: Vec<String>,
    /// Deselect an add-on (repeatable)
    #[arg(long = "no-addon")]
    no_addons: Vec<String>,
    #[arg(long = "threads-per-core")]
    threads_per_core: Option<u8>,
    /// Confidential VM (on/off)
    #[arg(long)]
    confidential: Option<String>,
    /// Advanced settings shown (on/off)
    #[arg(long)]
    advanced: Option<String>,
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{}", yansi::Paint::new(message.to_string()).red());
    process::exit(1);
}

fn print_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Success => println!("{}", yansi::Paint::new(&notice.message).green()),
        NoticeLevel::Info => println!("{}", yansi::Paint::new(&notice.message).cyan()),
        NoticeLevel::Warning => eprintln!("{}", yansi::Paint::new(&notice.message).yellow()),
        NoticeLevel::Error => eprintln!("{}", yansi::Paint::new(&notice.message).red()),
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table
}

fn load_catalog() -> Catalog {
    let Some(path) = config::get_catalog_file() else {
        return Catalog::builtin();
    };
    match Catalog::from_path(&path) {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Falling back to built-in catalog");
            print_notice(&Notice::warning(format!(
                "Ignoring catalog {}: {}. Using the built-in price list.",
                path.display(),
                e
            )));
            Catalog::builtin()
        }
    }
}

fn slot_path(slot: Option<&str>) -> PathBuf {
    match slot {
        Some(raw) => config::get_data_dir().join(format!("{}.json", config::sanitize_slot_name(raw))),
        None => config::snapshot_path(),
    }
}

/// Open the estimate stored at `path`, reporting anything but a clean load.
fn open_estimate(catalog: &Catalog, path: &Path) -> Estimate<FileStore> {
    let mut estimate = Estimate::new(catalog.clone(), FileStore::new(path))
        .with_currency(config::get_currency_symbol());
    let notice = estimate.load();
    if notice.is_error() {
        fail(format!(
            "{} Check that {} is readable.",
            notice.message,
            path.display()
        ));
    }
    if notice.is_warning() {
        print_notice(&notice);
    }
    estimate
}

fn persist(estimate: &mut Estimate<FileStore>) {
    let notice = estimate.save();
    if notice.is_error() {
        print_notice(&notice);
        process::exit(1);
    }
}

fn confirm(prompt: &str, assume_yes: bool) -> bool {
    if assume_yes {
        return true;
    }
    print!("{} [y/N] ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => parse_flag(Some(&answer), false),
        Err(_) => false,
    }
}

fn require<T>(found: Option<T>, kind: &str, id: &str) -> Result<(), String> {
    match found {
        Some(_) => Ok(()),
        None => Err(format!("Unknown {} '{}'. See `edgecalc catalog`.", kind, id)),
    }
}

/// Apply command-line edits to a draft, in the order the editor would.
fn apply_edits(
    catalog: &Catalog,
    draft: &mut ConfigurationDraft,
    args: &EditArgs,
) -> Result<Vec<Notice>, String> {
    let mut notices = Vec::new();

    if let Some(name) = &args.name {
        draft.set_name(name.trim());
    }
    if let Some(raw) = &args.service_type {
        let service_type = ServiceType::from_str(raw)
            .ok_or_else(|| format!("Unknown service type '{}'; use instance or vdc", raw))?;
        draft.set_service_type(catalog, service_type);
    }
    if let Some(id) = &args.template {
        require(catalog.find_instance_template(id), "instance template", id)?;
        if draft.service_type() != ServiceType::Instance {
            notices.push(Notice::warning("Templates only shape instances; --template ignored."));
        } else {
            draft.select_template(catalog, id);
        }
    }
    if let Some(id) = &args.os {
        require(catalog.find_operating_system(id), "operating system", id)?;
        draft.set_operating_system(id.as_str());
    }
    if let Some(id) = &args.boot_disk {
        require(catalog.find_boot_disk_type(id), "boot disk type", id)?;
        draft.set_boot_disk_type(id.as_str());
    }
    if let Some(id) = &args.region {
        require(catalog.find_region(id), "region", id)?;
        draft.set_region(id.as_str());
    }
    if let Some(id) = &args.term {
        require(catalog.find_commitment_term(id), "commitment term", id)?;
        draft.set_commitment_term(id.as_str());
    }
    if let Some(id) = &args.provisioning {
        require(catalog.find_provisioning_model(id), "provisioning model", id)?;
        draft.set_provisioning_model(id.as_str());
    }

    for pair in &args.resources {
        let (id, raw) = pair
            .split_once('=')
            .ok_or_else(|| format!("Expected ID=VALUE, got '{}'", pair))?;
        let def = catalog
            .resource(id.trim())
            .ok_or_else(|| format!("Unknown resource '{}'. See `edgecalc catalog resources`.", id))?;
        if draft.is_resource_locked(catalog, &def.id) {
            notices.push(Notice::warning(format!(
                "{} is set by the instance template; use --type vdc to size it freely.",
                def.label
            )));
            continue;
        }
        if let Some(value) = draft.set_resource_input(catalog, &def.id, raw) {
            if raw.trim() != value.to_string() {
                notices.push(Notice::info(format!("{} set to {}{}", def.label, value, def.unit)));
            }
        }
    }

    if let Some(raw) = &args.quantity {
        draft.set_quantity_input(raw);
    }

    if let Some(raw) = &args.gpus {
        draft.set_gpus_enabled(catalog, parse_flag(Some(raw), false));
    }
    if let Some(id) = &args.gpu_type {
        require(catalog.find_gpu_type(id), "GPU type", id)?;
        draft.set_gpu_type(catalog, id);
    }
    if let Some(count) = args.gpu_count {
        if !draft.gpus_enabled() {
            notices.push(Notice::warning("GPUs are off; pass --gpus on to price them."));
        }
        let applied = draft.set_gpu_count(catalog, count);
        if i64::from(applied) != count {
            notices.push(Notice::info(format!("GPU count set to {}", applied)));
        }
    }
    if draft.gpu_compatible(catalog) == Some(false) {
        notices.push(Notice::warning(
            "The selected GPU is not offered for the selected template series.",
        ));
    }

    for id in &args.addons {
        if !draft.set_addon(id, true) {
            return Err(format!("Unknown add-on '{}'", id));
        }
    }
    for id in &args.no_addons {
        if !draft.set_addon(id, false) {
            return Err(format!("Unknown add-on '{}'", id));
        }
    }

    if let Some(threads) = args.threads_per_core {
        draft.set_threads_per_core(threads);
    }
    if let Some(raw) = &args.confidential {
        draft.set_confidential_vm(parse_flag(Some(raw), false));
    }
    if let Some(raw) = &args.advanced {
        draft.set_advanced_settings(parse_flag(Some(raw), false));
    }

    Ok(notices)
}

fn print_summary_item(item: &SummaryItem, currency: &str) {
    let mut table = new_table();
    table.set_header(vec!["Field", "Value"]);
    let rows = [
        ("ID", item.id.clone()),
        ("Name", item.name.clone()),
        ("Type", item.service_type_name.clone()),
        ("Quantity", item.quantity.to_string()),
        ("Region", item.region_name.clone()),
        ("OS", item.os_name.clone()),
        ("Model", item.provisioning_name.clone()),
        ("GPUs", item.gpu_summary.clone()),
        ("Core resources", item.core_resources.clone()),
        ("Other resources", item.other_resources.clone()),
        ("Add-ons", item.addons_summary.clone()),
        (
            "Unit price",
            format!("{}/mo", format_money(currency, item.unit_monthly_price)),
        ),
        ("Billing", item.billing_cycle.clone()),
        (
            "Total",
            format!(
                "{}{}",
                format_money(currency, item.total_cost_for_period),
                item.billing_suffix
            ),
        ),
    ];
    for (field, value) in rows {
        table.add_row(vec![field.to_string(), value]);
    }
    println!("\n{table}\n");
}

fn print_estimate(estimate: &Estimate<FileStore>) {
    let summary = estimate.aggregate();
    if summary.is_empty() {
        println!("{}", yansi::Paint::new("The estimate has no configurations yet.").dim());
        return;
    }
    let currency = estimate.currency();
    let mut table = new_table();
    table.set_header(vec![
        "ID", "Name", "Type", "Qty", "Region", "Resources", "Unit/mo", "Billing", "Total",
    ]);
    for item in &summary.items {
        table.add_row(vec![
            item.id.clone(),
            item.name.clone(),
            item.service_type_name.clone(),
            item.quantity.to_string(),
            item.region_name.clone(),
            item.core_resources.clone(),
            format_money(currency, item.unit_monthly_price),
            item.billing_cycle.clone(),
            format_money(currency, item.total_cost_for_period),
        ]);
    }
    println!("\n{table}");
    println!(
        "\n{} {}\n",
        yansi::Paint::new("Grand Total:").bold(),
        yansi::Paint::new(format_money(currency, summary.grand_total)).green()
    );
}

fn print_catalog(catalog: &Catalog, kind: CatalogKind) {
    let mut table = new_table();
    match kind {
        CatalogKind::Resources => {
            table.set_header(vec!["ID", "Label", "Unit", "Price/unit", "Min", "Max", "Step", "Default"]);
            for r in catalog.resources() {
                table.add_row(vec![
                    r.id.clone(),
                    r.label.clone(),
                    r.unit.clone(),
                    format!("{:.2}", r.price_per_unit),
                    r.min.to_string(),
                    r.max.to_string(),
                    r.step.to_string(),
                    r.default_value.to_string(),
                ]);
            }
        }
        CatalogKind::Regions => {
            table.set_header(vec!["ID", "Name", "Multiplier"]);
            for r in catalog.regions() {
                table.add_row(vec![r.id.clone(), r.name.clone(), format!("x{}", r.price_multiplier)]);
            }
        }
        CatalogKind::Disks => {
            table.set_header(vec!["ID", "Name", "Storage multiplier"]);
            for d in catalog.boot_disk_types() {
                table.add_row(vec![d.id.clone(), d.name.clone(), format!("x{}", d.price_per_gb_multiplier)]);
            }
        }
        CatalogKind::Models => {
            table.set_header(vec!["ID", "Name", "Multiplier"]);
            for m in catalog.provisioning_models() {
                table.add_row(vec![m.id.clone(), m.name.clone(), format!("x{}", m.price_multiplier)]);
            }
        }
        CatalogKind::Os => {
            table.set_header(vec!["ID", "Name", "Price/mo", "Family"]);
            for o in catalog.operating_systems() {
                table.add_row(vec![
                    o.id.clone(),
                    o.name.clone(),
                    format!("{:.2}", o.price_monthly),
                    o.base_os_type.clone(),
                ]);
            }
        }
        CatalogKind::Gpus => {
            table.set_header(vec!["ID", "Name", "Price/mo", "Max", "Series"]);
            for g in catalog.gpu_types() {
                table.add_row(vec![
                    g.id.clone(),
                    g.name.clone(),
                    format!("{:.2}", g.price_monthly),
                    g.max_count.to_string(),
                    g.compatible_series.join(", "),
                ]);
            }
        }
        CatalogKind::Templates => {
            table.set_header(vec!["ID", "Name", "vCPU", "RAM GB", "Disk GB", "Boot disk", "Series"]);
            for t in catalog.instance_templates() {
                table.add_row(vec![
                    t.id.clone(),
                    t.name.clone(),
                    t.cores.to_string(),
                    t.ram.to_string(),
                    t.flash_disk.to_string(),
                    t.default_boot_disk_type_id.clone(),
                    t.series.clone(),
                ]);
            }
        }
        CatalogKind::Terms => {
            table.set_header(vec!["ID", "Name", "Multiplier", "Discount", "Suffix"]);
            for t in catalog.commitment_terms() {
                table.add_row(vec![
                    t.id.clone(),
                    t.name.clone(),
                    format!("x{}", t.price_multiplier),
                    format!("{:.0}%", t.discount * 100.0),
                    t.suffix.clone(),
                ]);
            }
        }
        CatalogKind::Addons => {
            table.set_header(vec!["ID", "Name", "Price/mo"]);
            for a in catalog.default_addons() {
                table.add_row(vec![a.id, a.name, format!("{:.2}", a.price_monthly)]);
            }
        }
    }
    println!("\n{table}\n");
}

/// `PLAN:QTY[:TERM][:rules]`
fn apply_posta_plan(quote: &mut PostaQuote, entry: &str) -> Result<(), String> {
    let mut parts = entry.split(':');
    let plan_id = parts.next().unwrap_or_default().trim();
    let quantity = parts
        .next()
        .and_then(|q| q.trim().parse::<i64>().ok())
        .ok_or_else(|| format!("Expected PLAN:QTY, got '{}'", entry))?;
    if !quote.set_quantity(plan_id, quantity) {
        return Err(format!("Unknown Posta plan '{}'", plan_id));
    }
    for part in parts.map(str::trim) {
        if part == "rules" {
            quote.set_addon(plan_id, "rules", true);
        } else if !quote.set_term(plan_id, part) {
            return Err(format!(
                "Unknown Posta term '{}'; use one of {}",
                part,
                POSTA_TERMS.iter().map(|t| t.id).collect::<Vec<_>>().join(", ")
            ));
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    config::load_env_file(cli.env_file.as_deref());
    let assume_yes = cli.yes || config::get_assume_yes();
    let catalog = load_catalog();
    let working_path = slot_path(cli.slot.as_deref());

    match cli.command {
        Commands::Catalog { kind } => print_catalog(&catalog, kind),
        Commands::List => {
            let estimate = open_estimate(&catalog, &working_path);
            print_estimate(&estimate);
        }
        Commands::Show { id } => {
            let estimate = open_estimate(&catalog, &working_path);
            let selected = estimate
                .get(&id)
                .unwrap_or_else(|| fail(format!("Configuration not found: {}", id)));
            let item = edgecalc::estimate::summarize(&catalog, selected);
            print_summary_item(&item, estimate.currency());
        }
        Commands::Add { edit } => {
            let mut estimate = open_estimate(&catalog, &working_path);
            let mut draft = estimate.new_draft();
            let notices = apply_edits(&catalog, &mut draft, &edit).unwrap_or_else(|e| fail(e));
            notices.iter().for_each(print_notice);
            let name = estimate.create(draft).name.clone();
            persist(&mut estimate);
            print_notice(&Notice::success(format!("Configuration \"{}\" added.", name)));
        }
        Commands::Edit { id, edit } => {
            let mut estimate = open_estimate(&catalog, &working_path);
            let mut draft = estimate.edit_draft(&id).unwrap_or_else(|e| fail(e));
            let notices = apply_edits(&catalog, &mut draft, &edit).unwrap_or_else(|e| fail(e));
            notices.iter().for_each(print_notice);
            let name = match estimate.update(&id, draft) {
                Ok(config) => config.name.clone(),
                Err(e) => fail(e),
            };
            persist(&mut estimate);
            print_notice(&Notice::success(format!("Configuration \"{}\" updated.", name)));
        }
        Commands::Duplicate { id } => {
            let mut estimate = open_estimate(&catalog, &working_path);
            let (new_id, name) = match estimate.duplicate(&id) {
                Ok(config) => (config.id.clone(), config.name.clone()),
                Err(e) => fail(e),
            };
            persist(&mut estimate);
            print_notice(&Notice::success(format!("Configuration \"{}\" added ({}).", name, new_id)));
        }
        Commands::Remove { id } => {
            let mut estimate = open_estimate(&catalog, &working_path);
            let name = match estimate.get(&id) {
                Some(config) => config.name.clone(),
                None => fail(format!("Configuration not found: {}", id)),
            };
            let prompt = format!("Are you sure you want to remove configuration: \"{}\"?", name);
            if !confirm(&prompt, assume_yes) {
                println!("{}", yansi::Paint::new("Nothing removed.").dim());
                return;
            }
            estimate.remove(&id);
            persist(&mut estimate);
            print_notice(&Notice::success(format!("Configuration \"{}\" removed.", name)));
        }
        Commands::Clear => {
            let mut estimate = open_estimate(&catalog, &working_path);
            let prompt = "Are you sure you want to clear the current estimate? This cannot be undone if not saved.";
            if !confirm(prompt, assume_yes) {
                println!("{}", yansi::Paint::new("Estimate kept.").dim());
                return;
            }
            print_notice(&estimate.clear());
        }
        Commands::Save { target } => {
            let estimate = open_estimate(&catalog, &working_path);
            let mut copy = Estimate::new(catalog.clone(), FileStore::new(slot_path(Some(&target))));
            copy.replace_all(estimate.configurations().to_vec());
            let notice = copy.save();
            print_notice(&notice);
            if notice.is_error() {
                process::exit(1);
            }
        }
        Commands::Load { source } => {
            let mut estimate = open_estimate(&catalog, &working_path);
            let mut loaded = Estimate::new(catalog.clone(), FileStore::new(slot_path(Some(&source))));
            let notice = loaded.load();
            if notice.level != NoticeLevel::Success {
                print_notice(&notice);
                process::exit(1);
            }
            estimate.replace_all(loaded.configurations().to_vec());
            persist(&mut estimate);
            print_notice(&notice);
        }
        Commands::Export { format } => {
            let estimate = open_estimate(&catalog, &working_path);
            match format {
                ExportFormat::Csv { output, stdout } => {
                    let Some(csv) = estimate.export_csv() else {
                        print_notice(&Notice::warning("No items in the estimate to download."));
                        return;
                    };
                    if stdout {
                        print!("{}", csv);
                        return;
                    }
                    let path = output.unwrap_or_else(|| PathBuf::from(config::DEFAULT_CSV_FILE_NAME));
                    if let Err(e) = std::fs::write(&path, csv) {
                        fail(format!("Failed to write {}: {}", path.display(), e));
                    }
                    tracing::info!(path = %path.display(), "Wrote CSV export");
                    print_notice(&Notice::success(format!("Estimate CSV written to {}.", path.display())));
                }
                ExportFormat::Email { link } => {
                    let body = estimate.export_narrative();
                    if link {
                        println!("{}", export::email_link(&body));
                    } else {
                        println!("Subject: {}\n\n{}", config::DEFAULT_EMAIL_SUBJECT, body);
                    }
                }
            }
        }
        Commands::Quote { edit } => {
            let mut draft = ConfigurationDraft::new(&catalog, 1);
            let notices = apply_edits(&catalog, &mut draft, &edit).unwrap_or_else(|e| fail(e));
            notices.iter().for_each(print_notice);
            let quoted = draft.into_configuration("quote".to_string(), "Quote".to_string());
            let item = edgecalc::estimate::summarize(&catalog, &quoted);
            print_summary_item(&item, &config::get_currency_symbol());
        }
        Commands::Posta { plans } => {
            let mut quote = PostaQuote::default();
            for entry in &plans {
                if let Err(e) = apply_posta_plan(&mut quote, entry) {
                    fail(e);
                }
            }
            let currency = config::get_currency_symbol();
            let summary = quote.summary();
            if summary.is_empty() {
                println!("{}", yansi::Paint::new("No Posta plans selected. Use --plan PLAN:QTY.").dim());
                return;
            }
            let mut table = new_table();
            table.set_header(vec!["Plan", "Mailboxes", "Billing", "Total"]);
            for item in &summary {
                table.add_row(vec![
                    item.name.clone(),
                    item.quantity.to_string(),
                    item.billing_cycle.clone(),
                    format_money(&currency, item.total),
                ]);
            }
            println!("\n{table}");
            println!(
                "\n{} {}\n",
                yansi::Paint::new("Grand Total:").bold(),
                yansi::Paint::new(format_money(&currency, quote.grand_total())).green()
            );
        }
    }
}
