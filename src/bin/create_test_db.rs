use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use peerpay::{
    Balance, NewPeerTransfer, NewTopUp, create_peer_transfer, create_top_up, create_user,
    initialize_db, set_balance,
};

/// A utility for creating a test database for the PeerPay web server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test users...");
    let asha = create_user(Some("Asha Rao"), &conn)?;
    let ravi = create_user(Some("Ravi Kumar"), &conn)?;
    let anonymous = create_user(None, &conn)?;

    set_balance(
        asha.id,
        Balance {
            amount: 1_245_050,
            locked: 25_000,
        },
        &conn,
    )?;
    set_balance(
        ravi.id,
        Balance {
            amount: 310_000,
            locked: 0,
        },
        &conn,
    )?;

    println!("Creating top-ups...");
    let now = OffsetDateTime::now_utc();
    let top_ups = [
        (Duration::minutes(20), 50_000, "Success", Some("HDFC Bank")),
        (Duration::hours(5), 25_000, "Processing", Some("PhonePe")),
        (Duration::hours(30), 100_000, "Success", Some("Google Pay")),
        (Duration::days(4), 20_000, "Failed", Some("ICICI Bank")),
        (Duration::days(12), 1_000_000, "Completed", None),
        (Duration::days(400), 75_000, "Success", Some("State Bank of India")),
    ];
    for (age, amount, status, provider) in top_ups {
        create_top_up(
            NewTopUp {
                user_id: asha.id,
                start_time: now - age,
                amount,
                status: status.to_owned(),
                provider: provider.map(str::to_owned),
            },
            &conn,
        )?;
    }

    println!("Creating peer transfers...");
    let transfers = [
        (asha.id, ravi.id, Duration::minutes(45), 10_000),
        (ravi.id, asha.id, Duration::hours(26), 35_050),
        (asha.id, anonymous.id, Duration::days(3), 5_000),
        (ravi.id, asha.id, Duration::days(40), 200_000),
    ];
    for (from_user_id, to_user_id, age, amount) in transfers {
        create_peer_transfer(
            NewPeerTransfer {
                from_user_id,
                to_user_id,
                timestamp: now - age,
                amount,
            },
            &conn,
        )?;
    }

    println!("Success! Sign in as user {} to see the seeded wallet.", asha.id);

    Ok(())
}
