use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

use crate::models::{Estrazione, Ruota};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS estrazioni (
    concorso    INTEGER PRIMARY KEY,
    data        TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS numeri (
    concorso    INTEGER NOT NULL,
    ruota       TEXT NOT NULL,
    n1          INTEGER NOT NULL,
    n2          INTEGER NOT NULL,
    n3          INTEGER NOT NULL,
    n4          INTEGER NOT NULL,
    n5          INTEGER NOT NULL,
    PRIMARY KEY (concorso, ruota)
);
";

pub fn db_path() -> std::path::PathBuf {
    let mut path = std::env::current_dir().unwrap_or_default();
    path.push("data");
    path.push("lotto.db");
    path
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Impossibile creare la cartella {:?}", parent))?;
    }
    let conn = Connection::open(path)
        .with_context(|| format!("Impossibile aprire il database {:?}", path))?;
    Ok(conn)
}

pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)
        .context("Migrazione fallita")?;
    Ok(())
}

/// Inserisce una estrazione completa. Un concorso già presente viene
/// ignorato; ritorna `true` solo se l'estrazione è stata inserita.
pub fn insert_estrazione(conn: &Connection, estrazione: &Estrazione) -> Result<bool> {
    let changed = conn
        .execute(
            "INSERT OR IGNORE INTO estrazioni (concorso, data) VALUES (?1, ?2)",
            rusqlite::params![estrazione.concorso, estrazione.data],
        )
        .context("Inserimento estrazione fallito")?;
    if changed == 0 {
        return Ok(false);
    }

    let mut stmt = conn.prepare(
        "INSERT OR IGNORE INTO numeri (concorso, ruota, n1, n2, n3, n4, n5)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?;
    for (ruota, numeri) in &estrazione.ruote {
        stmt.execute(rusqlite::params![
            estrazione.concorso,
            ruota.as_str(),
            numeri[0],
            numeri[1],
            numeri[2],
            numeri[3],
            numeri[4],
        ])
        .with_context(|| format!("Inserimento numeri ruota {} fallito", ruota))?;
    }
    Ok(true)
}

pub fn fetch_last_estrazioni(conn: &Connection, limit: u32) -> Result<Vec<Estrazione>> {
    let mut stmt = conn.prepare(
        "SELECT concorso, data FROM estrazioni ORDER BY concorso DESC LIMIT ?1",
    )?;
    let headers = stmt
        .query_map([limit], |row| {
            Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut numeri_stmt = conn.prepare(
        "SELECT ruota, n1, n2, n3, n4, n5 FROM numeri WHERE concorso = ?1 ORDER BY ruota",
    )?;

    let mut estrazioni = Vec::with_capacity(headers.len());
    for (concorso, data) in headers {
        let rows = numeri_stmt
            .query_map([concorso], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    [
                        row.get::<_, u8>(1)?,
                        row.get::<_, u8>(2)?,
                        row.get::<_, u8>(3)?,
                        row.get::<_, u8>(4)?,
                        row.get::<_, u8>(5)?,
                    ],
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut ruote = Vec::with_capacity(rows.len());
        for (nome, numeri) in rows {
            let ruota: Ruota = nome.parse()?;
            ruote.push((ruota, numeri));
        }
        ruote.sort_by_key(|(r, _)| *r);

        estrazioni.push(Estrazione {
            concorso,
            data,
            ruote,
        });
    }
    Ok(estrazioni)
}

/// Storico di una singola ruota, dal concorso più recente al più vecchio.
pub fn fetch_last_wheel(conn: &Connection, ruota: Ruota, limit: u32) -> Result<Vec<[u8; 5]>> {
    let mut stmt = conn.prepare(
        "SELECT n1, n2, n3, n4, n5 FROM numeri
         WHERE ruota = ?1 ORDER BY concorso DESC LIMIT ?2",
    )?;
    let rows = stmt
        .query_map(rusqlite::params![ruota.as_str(), limit], |row| {
            Ok([
                row.get::<_, u8>(0)?,
                row.get::<_, u8>(1)?,
                row.get::<_, u8>(2)?,
                row.get::<_, u8>(3)?,
                row.get::<_, u8>(4)?,
            ])
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn count_estrazioni(conn: &Connection) -> Result<u32> {
    let count: u32 = conn.query_row("SELECT COUNT(*) FROM estrazioni", [], |row| row.get(0))?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_estrazione(concorso: u32, data: &str) -> Estrazione {
        let ruote = Ruota::ALL
            .iter()
            .map(|&r| (r, [1, 2, 3, 4, 5]))
            .collect();
        Estrazione {
            concorso,
            data: data.to_string(),
            ruote,
        }
    }

    #[test]
    fn test_insert_and_count() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        assert_eq!(count_estrazioni(&conn).unwrap(), 0);

        insert_estrazione(&conn, &test_estrazione(5024, "2025-08-17")).unwrap();
        assert_eq!(count_estrazioni(&conn).unwrap(), 1);
    }

    #[test]
    fn test_duplicate_ignored() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        let inserted = insert_estrazione(&conn, &test_estrazione(5024, "2025-08-17")).unwrap();
        assert!(inserted);
        let inserted = insert_estrazione(&conn, &test_estrazione(5024, "2025-08-17")).unwrap();
        assert!(!inserted);
        assert_eq!(count_estrazioni(&conn).unwrap(), 1);
    }

    #[test]
    fn test_fetch_order() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        insert_estrazione(&conn, &test_estrazione(5022, "2025-08-10")).unwrap();
        insert_estrazione(&conn, &test_estrazione(5024, "2025-08-17")).unwrap();
        insert_estrazione(&conn, &test_estrazione(5023, "2025-08-13")).unwrap();

        let estrazioni = fetch_last_estrazioni(&conn, 10).unwrap();
        assert_eq!(estrazioni.len(), 3);
        assert_eq!(estrazioni[0].concorso, 5024);
        assert_eq!(estrazioni[1].concorso, 5023);
        assert_eq!(estrazioni[2].concorso, 5022);
        assert_eq!(estrazioni[0].ruote.len(), 11);
    }

    #[test]
    fn test_fetch_last_wheel() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        let mut vecchia = test_estrazione(5023, "2025-08-13");
        vecchia.ruote[0] = (Ruota::Bari, [10, 20, 30, 40, 50]);
        insert_estrazione(&conn, &vecchia).unwrap();

        let mut recente = test_estrazione(5024, "2025-08-17");
        recente.ruote[0] = (Ruota::Bari, [3, 17, 42, 55, 90]);
        insert_estrazione(&conn, &recente).unwrap();

        let storico = fetch_last_wheel(&conn, Ruota::Bari, 10).unwrap();
        assert_eq!(storico.len(), 2);
        assert_eq!(storico[0], [3, 17, 42, 55, 90]);
        assert_eq!(storico[1], [10, 20, 30, 40, 50]);

        let limitato = fetch_last_wheel(&conn, Ruota::Bari, 1).unwrap();
        assert_eq!(limitato, vec![[3, 17, 42, 55, 90]]);
    }
}
