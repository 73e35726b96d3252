//! call-auction CLI
//!
//! Run the uniform-price clearing from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Clear a book from a JSON file
//! call-auction clear --input book.json
//!
//! # Include the full optimal price range and output JSON
//! call-auction clear --input book.json --range --format json
//!
//! # Inspect cumulative depth
//! call-auction depth --input book.json
//!
//! # Generate a random book for testing
//! call-auction generate --asks 50 --bids 50
//! ```

use call_auction::analysis::allocation::allocate;
use call_auction::analysis::depth::DepthCurve;
use call_auction::core::book::Book;
use call_auction::core::order::{Order, Side};
use call_auction::simulation::book_gen::{generate_random_book, BookConfig};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"call-auction — volume-maximising uniform-price call auction clearing

USAGE:
    call-auction <COMMAND> [OPTIONS]

COMMANDS:
    clear       Clear a book at the volume-maximising uniform price
    depth       Print cumulative supply/demand depth for a book
    generate    Generate a random order book (for testing)
    help        Show this message

OPTIONS (clear):
    --input <FILE>      Path to JSON book file
    --format <FORMAT>   Output format: text (default) or json
    --range             Also report the full optimal price range

OPTIONS (depth):
    --input <FILE>      Path to JSON book file

OPTIONS (generate):
    --asks <N>          Number of sell orders (default: 50)
    --bids <N>          Number of buy orders (default: 50)
    --min-price <P>     Lowest price (default: 1)
    --max-price <P>     Highest price (default: 1000)
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    call-auction clear --input book.json
    call-auction clear --input book.json --range --format json
    call-auction depth --input book.json
    call-auction generate --asks 100 --bids 100 --output book.json"#
    );
}

fn dec_less(a: &Decimal, b: &Decimal) -> bool {
    a < b
}

/// JSON schema for one side's orders.
#[derive(serde::Deserialize)]
struct OrderInput {
    price: String,
    volume: u64,
}

#[derive(serde::Deserialize)]
struct BookFile {
    asks: Vec<OrderInput>,
    bids: Vec<OrderInput>,
}

/// JSON output schema for clearing results.
#[derive(serde::Serialize)]
struct ClearingOutput {
    cleared_at: DateTime<Utc>,
    matched: bool,
    price: Option<String>,
    volume: String,
    range_low: Option<String>,
    range_high: Option<String>,
    fills: Vec<FillOutput>,
}

#[derive(serde::Serialize)]
struct FillOutput {
    order: String,
    side: String,
    filled: u64,
    remaining: u64,
}

fn load_book(path: &str) -> Book<Decimal> {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let file: BookFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "asks": [ {{ "price": "50", "volume": 100 }} ],
  "bids": [ {{ "price": "90", "volume": 60 }} ]
}}"#
        );
        process::exit(1);
    });

    let parse_price = |raw: &str| -> Decimal {
        raw.parse().unwrap_or_else(|e| {
            eprintln!("Invalid price '{}': {}", raw, e);
            process::exit(1);
        })
    };

    let mut book = Book::new();
    for input in file.asks {
        book.add_ask(Order::new(parse_price(&input.price), input.volume));
    }
    for input in file.bids {
        book.add_bid(Order::new(parse_price(&input.price), input.volume));
    }

    book.sort(dec_less);
    book
}

fn cmd_clear(args: &[String]) {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut with_range = false;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            "--range" => {
                with_range = true;
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });

    let book = load_book(&path);
    let execution = book.clear(dec_less);
    let ranged = if with_range {
        book.clear_range(dec_less)
    } else {
        None
    };
    let fills = execution
        .as_ref()
        .map(|execution| allocate(&book, execution, dec_less))
        .unwrap_or_default();

    if format == "json" {
        let output = ClearingOutput {
            cleared_at: Utc::now(),
            matched: execution.is_some(),
            price: execution.as_ref().map(|e| e.price.to_string()),
            volume: execution
                .as_ref()
                .map(|e| e.volume.to_string())
                .unwrap_or_else(|| "0".to_string()),
            range_low: ranged.as_ref().map(|r| r.range.low.to_string()),
            range_high: ranged.as_ref().map(|r| r.range.high.to_string()),
            fills: fills
                .iter()
                .map(|fill| FillOutput {
                    order: fill.order.to_string(),
                    side: fill.side.to_string(),
                    filled: fill.filled,
                    remaining: fill.remaining,
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output).unwrap());
    } else {
        match &execution {
            None => println!("No match: no positive volume can clear."),
            Some(execution) => {
                println!("=== Clearing Result ===");
                println!("Price:   {}", execution.price);
                println!("Volume:  {}", execution.volume);
                if let Some(ranged) = &ranged {
                    println!("Range:   {}", ranged.range);
                }
                println!("\nFills:");
                for fill in &fills {
                    println!("  {}", fill);
                }
            }
        }
    }
}

fn cmd_depth(args: &[String]) {
    let mut input_path = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });

    let book = load_book(&path);
    let curve = DepthCurve::from_book(&book);

    println!("=== Book Depth ===");
    match (curve.best_ask(), curve.best_bid()) {
        (Some(ask), Some(bid)) => {
            println!("Best ask:        {}", ask);
            println!("Best bid:        {}", bid);
        }
        _ => println!("One or both sides are empty."),
    }
    println!("Ask volume:      {}", book.side_volume(Side::Ask));
    println!("Bid volume:      {}", book.side_volume(Side::Bid));
    println!("Max executable:  {}", curve.max_executable(&dec_less));
}

fn cmd_generate(args: &[String]) {
    let mut config = BookConfig {
        ask_count: 50,
        bid_count: 50,
        ..Default::default()
    };
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--asks" => {
                i += 1;
                config.ask_count = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--asks requires a number");
                    process::exit(1);
                });
            }
            "--bids" => {
                i += 1;
                config.bid_count = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--bids requires a number");
                    process::exit(1);
                });
            }
            "--min-price" => {
                i += 1;
                config.min_price = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--min-price requires a decimal");
                    process::exit(1);
                });
            }
            "--max-price" => {
                i += 1;
                config.max_price = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--max-price requires a decimal");
                    process::exit(1);
                });
            }
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let book = generate_random_book(&config);

    #[derive(serde::Serialize)]
    struct OutputOrder {
        price: String,
        volume: u64,
    }

    #[derive(serde::Serialize)]
    struct OutputFile {
        asks: Vec<OutputOrder>,
        bids: Vec<OutputOrder>,
    }

    let output = OutputFile {
        asks: book
            .asks()
            .iter()
            .map(|entry| OutputOrder {
                price: entry.order.price.to_string(),
                volume: entry.order.volume,
            })
            .collect(),
        bids: book
            .bids()
            .iter()
            .map(|entry| OutputOrder {
                price: entry.order.price.to_string(),
                volume: entry.order.volume,
            })
            .collect(),
    };

    let json = serde_json::to_string_pretty(&output).unwrap();

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!(
            "Generated {} asks and {} bids → {}",
            config.ask_count, config.bid_count, path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "clear" => cmd_clear(rest),
        "depth" => cmd_depth(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
