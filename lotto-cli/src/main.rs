mod analysis;
mod display;
mod import;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};

use crate::analysis::combo::{demo_estrazione, generate_combinations};
use crate::analysis::compute_stats;
use crate::display::{
    display_combinazioni, display_demo, display_estrazioni, display_import_summary,
    display_stats,
};
use lotto_db::db::{
    count_estrazioni, db_path, fetch_last_estrazioni, fetch_last_wheel, insert_estrazione,
    migrate, open_db,
};
use lotto_db::models::{validate_cinquina, Estrazione, GiocoRuota, Ruota, TipoGiocata};

#[derive(Parser)]
#[command(name = "lotto", about = "Statistiche e combinazioni per il Gioco del Lotto")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Importare le estrazioni da un file CSV
    Import {
        /// Percorso del file CSV (concorso;data;ruota;n1;n2;n3;n4;n5)
        #[arg(short, long, default_value = "assets/estrazioni.csv")]
        file: PathBuf,
    },

    /// Mostrare il percorso del database
    DbPath,

    /// Elencare le ultime estrazioni
    List {
        /// Numero di estrazioni da mostrare
        #[arg(short, long, default_value = "10")]
        last: u32,
    },

    /// Mostrare frequenze e ritardi di una ruota
    Stats {
        /// Ruota da analizzare
        #[arg(short, long, default_value = "bari", value_parser = parse_ruota)]
        ruota: Ruota,

        /// Finestra di analisi (numero di estrazioni)
        #[arg(short, long, default_value = "100")]
        window: u32,
    },

    /// Generare combinazioni casuali con la probabilità teorica
    Genera {
        /// Tipo di giocata
        #[arg(short, long, default_value = "cinquina", value_parser = parse_tipo)]
        tipo: TipoGiocata,

        /// Ruota su cui giocare, oppure "tutte"
        #[arg(short, long, default_value = "tutte", value_parser = parse_gioco)]
        ruota: GiocoRuota,

        /// Numero di combinazioni da generare
        #[arg(short, long, default_value = "3")]
        count: usize,

        /// Seed per la riproducibilità
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Generare una estrazione dimostrativa su tutte le ruote
    Demo {
        /// Numero di concorso fittizio
        #[arg(long, default_value = "5024")]
        concorso: u32,

        /// Seed per la riproducibilità
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Aggiungere una estrazione manualmente
    Add,
}

fn parse_ruota(s: &str) -> Result<Ruota, String> {
    s.parse().map_err(|e: anyhow::Error| e.to_string())
}

fn parse_gioco(s: &str) -> Result<GiocoRuota, String> {
    s.parse().map_err(|e: anyhow::Error| e.to_string())
}

fn parse_tipo(s: &str) -> Result<TipoGiocata, String> {
    s.parse().map_err(|e: anyhow::Error| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let path = db_path();
    let conn = open_db(&path)?;
    migrate(&conn)?;

    match cli.command {
        Command::Import { file } => cmd_import(&conn, &file),
        Command::DbPath => {
            println!("{}", path.display());
            Ok(())
        }
        Command::List { last } => cmd_list(&conn, last),
        Command::Stats { ruota, window } => cmd_stats(&conn, ruota, window),
        Command::Genera {
            tipo,
            ruota,
            count,
            seed,
        } => cmd_genera(tipo, ruota, count, seed),
        Command::Demo { concorso, seed } => cmd_demo(concorso, seed),
        Command::Add => cmd_add(&conn),
    }
}

fn cmd_import(conn: &lotto_db::rusqlite::Connection, file: &PathBuf) -> Result<()> {
    let result = import::import_csv(conn, file)?;
    display_import_summary(&result);
    Ok(())
}

fn cmd_list(conn: &lotto_db::rusqlite::Connection, last: u32) -> Result<()> {
    let n = count_estrazioni(conn)?;
    if n == 0 {
        println!("Database vuoto. Eseguire prima: lotto import");
        return Ok(());
    }
    let estrazioni = fetch_last_estrazioni(conn, last)?;
    display_estrazioni(&estrazioni);
    Ok(())
}

fn cmd_stats(conn: &lotto_db::rusqlite::Connection, ruota: Ruota, window: u32) -> Result<()> {
    let n = count_estrazioni(conn)?;
    if n == 0 {
        println!("Database vuoto. Eseguire prima: lotto import");
        return Ok(());
    }
    let effective_window = window.min(n);
    let storico = fetch_last_wheel(conn, ruota, effective_window)?;

    let stats = compute_stats(&storico);
    display_stats(&stats, ruota);
    Ok(())
}

fn cmd_genera(
    tipo: TipoGiocata,
    ruota: GiocoRuota,
    count: usize,
    seed: Option<u64>,
) -> Result<()> {
    let combinazioni = generate_combinations(tipo, ruota, count, seed);
    display_combinazioni(&combinazioni);
    Ok(())
}

fn cmd_demo(concorso: u32, seed: Option<u64>) -> Result<()> {
    let data = Local::now().format("%Y-%m-%d").to_string();
    let estrazione = demo_estrazione(concorso, data, seed);
    display_demo(&estrazione);
    Ok(())
}

fn cmd_add(conn: &lotto_db::rusqlite::Connection) -> Result<()> {
    println!("Inserimento manuale di una estrazione\n");

    let concorso: u32 = prompt("Numero del concorso (es: 5024) : ")?
        .parse()
        .context("Concorso non valido")?;
    if concorso == 0 {
        bail!("Il concorso deve essere positivo");
    }

    let raw_data = prompt("Data (GG/MM/AAAA) : ")?;
    let parti: Vec<&str> = raw_data.split('/').collect();
    if parti.len() != 3 {
        bail!("Formato data non valido");
    }
    let data = format!("{}-{}-{}", parti[2], parti[1], parti[0]);

    let mut ruote = Vec::with_capacity(Ruota::ALL.len());
    for ruota in Ruota::ALL {
        let numeri = prompt_cinquina(ruota)?;
        ruote.push((ruota, numeri));
    }

    let estrazione = Estrazione {
        concorso,
        data,
        ruote,
    };

    println!("\nEstrazione da inserire:");
    display_estrazioni(std::slice::from_ref(&estrazione));

    let conferma = prompt("\nConfermare l'inserimento? (s/n) : ")?;
    if conferma.trim().to_lowercase() == "s" {
        let inserted = insert_estrazione(conn, &estrazione)?;
        if inserted {
            println!("Estrazione inserita.");
        } else {
            println!("Questo concorso esiste già (doppione ignorato).");
        }
    } else {
        println!("Inserimento annullato.");
    }

    Ok(())
}

fn prompt(msg: &str) -> Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Errore di lettura")?;
    Ok(input.trim().to_string())
}

fn prompt_cinquina(ruota: Ruota) -> Result<[u8; 5]> {
    loop {
        let input = prompt(&format!(
            "Ruota di {} — 5 numeri separati da spazio (1-90) : ",
            ruota
        ))?;
        let nums: Result<Vec<u8>, _> = input.split_whitespace().map(|s| s.parse::<u8>()).collect();
        match nums {
            Ok(v) if v.len() == 5 => {
                let arr = [v[0], v[1], v[2], v[3], v[4]];
                if validate_cinquina(&arr).is_ok() {
                    return Ok(arr);
                }
                println!("Numeri non validi (1-90, senza doppioni). Riprovare.");
            }
            _ => println!("Inserire esattamente 5 numeri. Riprovare."),
        }
    }
}
