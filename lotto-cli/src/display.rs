use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::import::ImportResult;
use lotto_db::models::{Combinazione, Estrazione, Ruota, Statistiche};

fn format_numeri(numeri: &[u8]) -> String {
    numeri
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

pub fn display_estrazioni(estrazioni: &[Estrazione]) {
    if estrazioni.is_empty() {
        println!("Nessuna estrazione da mostrare.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Concorso", "Data", "Ruota", "Numeri"]);

    for estrazione in estrazioni {
        for (i, (ruota, numeri)) in estrazione.ruote.iter().enumerate() {
            let mut ordinati = *numeri;
            ordinati.sort();
            let (concorso, data) = if i == 0 {
                (estrazione.concorso.to_string(), estrazione.data.clone())
            } else {
                (String::new(), String::new())
            };
            table.add_row(vec![
                concorso,
                data,
                ruota.to_string(),
                format_numeri(&ordinati),
            ]);
        }
    }

    println!("{table}");
}

pub fn display_import_summary(result: &ImportResult) {
    println!("Importazione completata:");
    println!("  Righe lette        : {}", result.total_records);
    println!("  Estrazioni inserite: {}", result.inserted);
    println!("  Doppioni ignorati  : {}", result.skipped);
    if result.errors > 0 {
        println!("  Errori             : {}", result.errors);
    }
}

pub fn display_stats(stats: &Statistiche, ruota: Ruota) {
    if !stats.con_storico {
        println!("Nessuno storico per la ruota di {}.", ruota);
        return;
    }

    println!(
        "\n📊 Ruota di {} — ultime {} estrazioni\n",
        ruota, stats.finestra
    );

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Numero", "Frequenza", "Ritardo"]);

    let mut ordinati = stats.numeri.to_vec();
    ordinati.sort_by(|a, b| b.frequenza.cmp(&a.frequenza).then(a.numero.cmp(&b.numero)));

    for stato in &ordinati {
        let ritardo = if stato.ritardo == stats.finestra {
            Cell::new(stato.ritardo.to_string()).fg(Color::Red)
        } else {
            Cell::new(stato.ritardo.to_string())
        };
        table.add_row(vec![
            Cell::new(format!("{:2}", stato.numero)),
            Cell::new(stato.frequenza.to_string()),
            ritardo,
        ]);
    }
    println!("{table}");
}

pub fn display_combinazioni(combinazioni: &[Combinazione]) {
    println!("\n🎲 Combinazioni generate\n");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Numeri", "Tipo", "Ruota", "Probabilità"]);

    for (i, c) in combinazioni.iter().enumerate() {
        table.add_row(vec![
            format!("{}", i + 1),
            format_numeri(&c.numeri),
            c.tipo.to_string(),
            c.gioco.to_string(),
            c.probabilita.to_string(),
        ]);
    }
    println!("{table}");
}

pub fn display_demo(estrazione: &Estrazione) {
    println!(
        "\n🎲 Estrazione dimostrativa — concorso {} del {}\n",
        estrazione.concorso, estrazione.data
    );
    display_estrazioni(std::slice::from_ref(estrazione));
    println!("Numeri generati casualmente, solo a scopo dimostrativo.");
}
