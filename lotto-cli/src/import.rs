use anyhow::{bail, Context, Result};
use lotto_db::rusqlite::Connection;
use std::collections::BTreeMap;
use std::path::Path;

use lotto_db::db::insert_estrazione;
use lotto_db::models::{validate_cinquina, Estrazione, Ruota};

/// Una riga del CSV: la cinquina di una ruota per un concorso.
/// Formato: `concorso;data;ruota;n1;n2;n3;n4;n5`, data in GG/MM/AAAA.
struct RigaRuota {
    concorso: u32,
    data: String,
    ruota: Ruota,
    numeri: [u8; 5],
}

fn parse_record(record: &csv::StringRecord) -> Result<RigaRuota> {
    let get = |idx: usize| -> Result<String> {
        record
            .get(idx)
            .map(|s| s.trim().to_string())
            .with_context(|| format!("Campo mancante all'indice {}", idx))
    };

    let get_u8 = |idx: usize| -> Result<u8> {
        let s = get(idx)?;
        s.parse::<u8>()
            .with_context(|| format!("Impossibile leggere '{}' (indice {})", s, idx))
    };

    let concorso_str = get(0)?;
    let concorso: u32 = concorso_str
        .parse()
        .with_context(|| format!("Concorso non valido: '{}'", concorso_str))?;
    if concorso == 0 {
        bail!("Il concorso deve essere positivo");
    }

    let data = parse_date(&get(1)?)?;
    let ruota: Ruota = get(2)?.parse()?;

    let numeri: [u8; 5] = [get_u8(3)?, get_u8(4)?, get_u8(5)?, get_u8(6)?, get_u8(7)?];
    validate_cinquina(&numeri)?;

    Ok(RigaRuota {
        concorso,
        data,
        ruota,
        numeri,
    })
}

fn parse_date(raw: &str) -> Result<String> {
    let parts: Vec<&str> = raw.split('/').collect();
    if parts.len() != 3 {
        bail!("Formato data non valido: '{}'", raw);
    }
    Ok(format!("{}-{}-{}", parts[2], parts[1], parts[0]))
}

pub struct ImportResult {
    pub total_records: u32,
    pub inserted: u32,
    pub skipped: u32,
    pub errors: u32,
}

pub fn import_csv(conn: &Connection, path: &Path) -> Result<ImportResult> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Impossibile aprire {:?}", path))?;

    let mut result = ImportResult {
        total_records: 0,
        inserted: 0,
        skipped: 0,
        errors: 0,
    };

    // Le righe di uno stesso concorso vengono raggruppate in una sola
    // estrazione prima dell'inserimento.
    let mut estrazioni: BTreeMap<u32, Estrazione> = BTreeMap::new();

    for record_result in reader.records() {
        result.total_records += 1;
        match record_result {
            Ok(record) => match parse_record(&record) {
                Ok(riga) => {
                    let estrazione =
                        estrazioni.entry(riga.concorso).or_insert_with(|| Estrazione {
                            concorso: riga.concorso,
                            data: riga.data.clone(),
                            ruote: Vec::new(),
                        });
                    if estrazione.numeri(riga.ruota).is_some() {
                        eprintln!(
                            "Ruota {} duplicata per il concorso {}, riga {} ignorata",
                            riga.ruota, riga.concorso, result.total_records
                        );
                        result.errors += 1;
                    } else {
                        estrazione.ruote.push((riga.ruota, riga.numeri));
                    }
                }
                Err(e) => {
                    eprintln!("Errore di lettura alla riga {}: {}", result.total_records, e);
                    result.errors += 1;
                }
            },
            Err(e) => {
                eprintln!("Errore di lettura alla riga {}: {}", result.total_records, e);
                result.errors += 1;
            }
        }
    }

    let tx = conn
        .unchecked_transaction()
        .context("Impossibile avviare la transazione")?;

    for estrazione in estrazioni.values() {
        match insert_estrazione(&tx, estrazione) {
            Ok(true) => result.inserted += 1,
            Ok(false) => result.skipped += 1,
            Err(e) => {
                eprintln!("Errore inserimento concorso {}: {}", estrazione.concorso, e);
                result.errors += 1;
            }
        }
    }

    tx.commit().context("Commit fallito")?;
    Ok(result)
}
