//! Katalog CLI

use std::{
    io::{self, BufRead, Write},
    process::ExitCode,
};

use clap::{Args, Parser, Subcommand};
use katalog::{
    catalog::{Catalog, CatalogError, DeleteOutcome, Submitted},
    clock::SystemClock,
    config::Config,
    draft::Draft,
    listing, logging,
    products::{Product, ProductId},
    storage::FileStorage,
};

#[derive(Debug, Parser)]
#[command(name = "katalog", about = "Product catalog manager", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List every product, newest first
    List,

    /// Show a single product
    Show(ShowArgs),

    /// Add a product
    Add(AddArgs),

    /// Edit a product
    Edit(EditArgs),

    /// Delete a product
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Product id
    id: ProductId,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Product name
    #[arg(long)]
    name: String,

    /// Product description
    #[arg(long, default_value = "")]
    description: String,

    /// Price
    #[arg(long, allow_hyphen_values = true)]
    price: String,

    /// Category (Elektronik, Pakaian or Makanan)
    #[arg(long)]
    category: String,

    /// Release date (YYYY-MM-DD)
    #[arg(long, default_value = "")]
    release_date: String,

    /// Stock on hand
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    stock: String,

    /// Add the product as inactive
    #[arg(long)]
    inactive: bool,
}

impl AddArgs {
    fn into_draft(self) -> Draft {
        Draft {
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            release_date: self.release_date,
            stock: self.stock,
            active: !self.inactive,
        }
    }
}

#[derive(Debug, Args)]
struct EditArgs {
    /// Product id
    id: ProductId,

    /// New name
    #[arg(long)]
    name: Option<String>,

    /// New description
    #[arg(long)]
    description: Option<String>,

    /// New price
    #[arg(long, allow_hyphen_values = true)]
    price: Option<String>,

    /// New category
    #[arg(long)]
    category: Option<String>,

    /// New release date (YYYY-MM-DD)
    #[arg(long, conflicts_with = "clear_release_date")]
    release_date: Option<String>,

    /// Remove the release date
    #[arg(long)]
    clear_release_date: bool,

    /// New stock level
    #[arg(long, allow_hyphen_values = true)]
    stock: Option<String>,

    /// Mark the product active
    #[arg(long, conflicts_with = "inactive")]
    active: bool,

    /// Mark the product inactive
    #[arg(long)]
    inactive: bool,
}

impl EditArgs {
    fn apply(self, draft: &mut Draft) {
        if let Some(name) = self.name {
            draft.name = name;
        }

        if let Some(description) = self.description {
            draft.description = description;
        }

        if let Some(price) = self.price {
            draft.price = price;
        }

        if let Some(category) = self.category {
            draft.category = category;
        }

        if let Some(release_date) = self.release_date {
            draft.release_date = release_date;
        } else if self.clear_release_date {
            draft.release_date.clear();
        }

        if let Some(stock) = self.stock {
            draft.stock = stock;
        }

        if self.active {
            draft.active = true;
        } else if self.inactive {
            draft.active = false;
        }
    }
}

#[derive(Debug, Args)]
struct DeleteArgs {
    /// Product id
    id: ProductId,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

#[expect(clippy::print_stderr, reason = "CLI error reporting")]
fn main() -> ExitCode {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = logging::init(&cli.config.log_level) {
        eprintln!("{error}");
    }

    match run(cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, String> {
    let currency = cli.config.currency().map_err(|error| error.to_string())?;

    let mut catalog = Catalog::open(cli.config.storage(), SystemClock)
        .with_notification_timeout(cli.config.notification_timeout());

    match cli.command {
        Commands::List => {
            listing::write_to(io::stdout().lock(), catalog.products(), currency)
                .map_err(|error| format!("failed to print products: {error}"))?;

            Ok(ExitCode::SUCCESS)
        }
        Commands::Show(args) => {
            let product = catalog
                .product(args.id)
                .ok_or_else(|| format!("no product with id {}", args.id))?;

            listing::write_details(io::stdout().lock(), product, currency)
                .map_err(|error| format!("failed to print product: {error}"))?;

            Ok(ExitCode::SUCCESS)
        }
        Commands::Add(args) => {
            *catalog.draft_mut() = args.into_draft();

            submit(&mut catalog)
        }
        Commands::Edit(args) => {
            if !catalog.begin_edit(args.id) {
                return Err(format!("no product with id {}", args.id));
            }

            args.apply(catalog.draft_mut());

            submit(&mut catalog)
        }
        Commands::Delete(args) => delete(&mut catalog, &args),
    }
}

#[expect(clippy::print_stdout, clippy::print_stderr, reason = "CLI output")]
fn submit(catalog: &mut Catalog<FileStorage>) -> Result<ExitCode, String> {
    let outcome = catalog.submit();

    print_notification(catalog);

    match outcome {
        Ok(Submitted::Created(id) | Submitted::Updated(id)) => {
            println!("id: {id}");
        }
        Err(CatalogError::Validation(errors)) => {
            for (field, error) in &errors {
                eprintln!("  {field}: {error}");
            }

            return Ok(ExitCode::FAILURE);
        }
        Err(error) => return Err(error.to_string()),
    }

    ensure_saved(catalog)
}

#[expect(clippy::print_stderr, reason = "CLI output")]
fn delete(catalog: &mut Catalog<FileStorage>, args: &DeleteArgs) -> Result<ExitCode, String> {
    match catalog.delete(args.id, |product| args.yes || confirm(product)) {
        DeleteOutcome::Deleted(_) => {
            print_notification(catalog);

            ensure_saved(catalog)
        }
        DeleteOutcome::Declined => {
            eprintln!("delete cancelled");

            Ok(ExitCode::SUCCESS)
        }
        DeleteOutcome::NotFound => {
            eprintln!("no product with id {}", args.id);

            Ok(ExitCode::SUCCESS)
        }
    }
}

fn ensure_saved(catalog: &Catalog<FileStorage>) -> Result<ExitCode, String> {
    if catalog.is_dirty() {
        return Err("changes could not be saved".to_string());
    }

    Ok(ExitCode::SUCCESS)
}

#[expect(clippy::print_stdout, reason = "CLI output")]
fn print_notification(catalog: &Catalog<FileStorage>) {
    if let Some(notification) = catalog.notification() {
        println!("{notification}");
    }
}

#[expect(clippy::print_stderr, reason = "interactive prompt")]
fn confirm(product: &Product) -> bool {
    eprint!("Delete product \"{}\"? [y/N] ", product.name());

    let _flushed = io::stderr().flush();

    let mut answer = String::new();

    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }

    let answer = answer.trim();

    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}
