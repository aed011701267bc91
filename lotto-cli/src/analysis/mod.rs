pub mod combo;

use lotto_db::models::{StatoNumero, Statistiche};

/// Frequenze e ritardi dei numeri 1-90 su una ruota.
///
/// `draws` è lo storico della ruota dal concorso più recente al più
/// vecchio. Il ritardo di un numero è l'indice della prima estrazione
/// che lo contiene: 0 se è uscito nell'ultima, pari alla finestra se
/// non è mai uscito. Con storico vuoto tutte le tabelle valgono zero e
/// `con_storico` è `false`.
pub fn compute_stats(draws: &[[u8; 5]]) -> Statistiche {
    let finestra = draws.len() as u32;
    let mut frequenze = [0u32; 90];
    let mut prime_uscite: [Option<u32>; 90] = [None; 90];

    for (i, numeri) in draws.iter().enumerate() {
        for &n in numeri {
            let idx = (n - 1) as usize;
            frequenze[idx] += 1;
            if prime_uscite[idx].is_none() {
                prime_uscite[idx] = Some(i as u32);
            }
        }
    }

    let numeri = (1..=90u8)
        .map(|n| {
            let idx = (n - 1) as usize;
            StatoNumero {
                numero: n,
                frequenza: frequenze[idx],
                ritardo: if finestra == 0 {
                    0
                } else {
                    prime_uscite[idx].unwrap_or(finestra)
                },
            }
        })
        .collect();

    Statistiche {
        finestra,
        con_storico: finestra > 0,
        numeri,
    }
}
