use rand::rngs::StdRng;
use rand::seq::index;
use rand::SeedableRng;

use lotto_db::models::{Combinazione, Estrazione, GiocoRuota, Probabilita, Ruota, TipoGiocata};

/// Numeri estraibili su ogni ruota.
pub const NUMERI_RUOTA: u64 = 90;

/// Coefficiente binomiale C(n, k), esatto.
pub fn choose(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result = 1u64;
    for i in 1..=k {
        // result * (n - k + i) è sempre divisibile per i: il prodotto
        // parziale è a sua volta un coefficiente binomiale.
        result = result * (n - k + i) / i;
    }
    result
}

/// Probabilità teorica di centrare la combinazione in una estrazione:
/// 1 su C(90, k) su ruota singola, migliorata del numero di ruote in
/// gioco per la giocata su tutte le ruote.
pub fn probabilita(tipo: TipoGiocata, gioco: GiocoRuota) -> Probabilita {
    Probabilita {
        favorevoli: gioco.ruote_in_gioco(),
        possibili: choose(NUMERI_RUOTA, tipo.cardinalita() as u64),
    }
}

fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

fn sample_numeri(rng: &mut StdRng, quanti: usize) -> Vec<u8> {
    let mut numeri: Vec<u8> = index::sample(rng, NUMERI_RUOTA as usize, quanti)
        .iter()
        .map(|i| (i + 1) as u8)
        .collect();
    numeri.sort();
    numeri
}

/// Genera `count` combinazioni uniformi senza ripetizioni, in ordine
/// crescente, con la probabilità teorica della giocata.
pub fn generate_combinations(
    tipo: TipoGiocata,
    gioco: GiocoRuota,
    count: usize,
    seed: Option<u64>,
) -> Vec<Combinazione> {
    let mut rng = rng_from_seed(seed);
    let prob = probabilita(tipo, gioco);

    (0..count)
        .map(|_| Combinazione {
            numeri: sample_numeri(&mut rng, tipo.cardinalita()),
            tipo,
            gioco,
            probabilita: prob,
        })
        .collect()
}

/// Estrazione dimostrativa: una cinquina casuale per ogni ruota in gioco.
pub fn demo_estrazione(concorso: u32, data: String, seed: Option<u64>) -> Estrazione {
    let mut rng = rng_from_seed(seed);
    let ruote = Ruota::IN_GIOCO
        .iter()
        .map(|&ruota| {
            let numeri = sample_numeri(&mut rng, 5);
            (ruota, [numeri[0], numeri[1], numeri[2], numeri[3], numeri[4]])
        })
        .collect();
    Estrazione {
        concorso,
        data,
        ruote,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotto_db::models::validate_cinquina;

    const TIPI: [TipoGiocata; 4] = [
        TipoGiocata::Ambo,
        TipoGiocata::Terno,
        TipoGiocata::Quaterna,
        TipoGiocata::Cinquina,
    ];

    #[test]
    fn test_choose_exact_values() {
        assert_eq!(choose(90, 2), 4_005);
        assert_eq!(choose(90, 3), 117_480);
        assert_eq!(choose(90, 4), 2_555_190);
        assert_eq!(choose(90, 5), 43_949_268);
        assert_eq!(choose(5, 0), 1);
        assert_eq!(choose(5, 5), 1);
        assert_eq!(choose(4, 5), 0);
    }

    #[test]
    fn test_probabilita_ruota_singola() {
        let p = probabilita(TipoGiocata::Ambo, GiocoRuota::Singola(Ruota::Bari));
        assert_eq!(
            p,
            Probabilita {
                favorevoli: 1,
                possibili: 4_005
            }
        );
    }

    #[test]
    fn test_probabilita_tutte_le_ruote() {
        let p = probabilita(TipoGiocata::Ambo, GiocoRuota::Tutte);
        assert_eq!(
            p,
            Probabilita {
                favorevoli: 10,
                possibili: 4_005
            }
        );
    }

    #[test]
    fn test_combinations_valid_over_many_trials() {
        for tipo in TIPI {
            let combinazioni =
                generate_combinations(tipo, GiocoRuota::Tutte, 10_000, Some(42));
            assert_eq!(combinazioni.len(), 10_000);
            for c in &combinazioni {
                assert_eq!(c.numeri.len(), tipo.cardinalita());
                for finestra in c.numeri.windows(2) {
                    assert!(finestra[0] < finestra[1], "{:?}", c.numeri);
                }
                for &n in &c.numeri {
                    assert!((1..=90).contains(&n));
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_combinations() {
        let prima = generate_combinations(
            TipoGiocata::Terno,
            GiocoRuota::Singola(Ruota::Napoli),
            5,
            Some(7),
        );
        let seconda = generate_combinations(
            TipoGiocata::Terno,
            GiocoRuota::Singola(Ruota::Napoli),
            5,
            Some(7),
        );
        for (a, b) in prima.iter().zip(seconda.iter()) {
            assert_eq!(a.numeri, b.numeri);
        }
    }

    #[test]
    fn test_every_number_reachable() {
        let combinazioni = generate_combinations(
            TipoGiocata::Cinquina,
            GiocoRuota::Singola(Ruota::Bari),
            10_000,
            Some(1),
        );
        let mut visti = [false; 90];
        for c in &combinazioni {
            for &n in &c.numeri {
                visti[(n - 1) as usize] = true;
            }
        }
        assert!(visti.iter().all(|&v| v), "numeri mai estratti in 10000 prove");
    }

    #[test]
    fn test_demo_estrazione() {
        let estrazione = demo_estrazione(5024, "2025-08-17".to_string(), Some(3));
        assert_eq!(estrazione.concorso, 5024);
        assert_eq!(estrazione.ruote.len(), 10);
        for (_, numeri) in &estrazione.ruote {
            validate_cinquina(numeri).unwrap();
        }
    }
}
