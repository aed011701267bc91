use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Error, Result};

/// Le undici ruote del Gioco del Lotto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Ruota {
    Bari,
    Cagliari,
    Firenze,
    Genova,
    Milano,
    Napoli,
    Palermo,
    Roma,
    Torino,
    Venezia,
    Nazionale,
}

impl Ruota {
    pub const ALL: [Ruota; 11] = [
        Ruota::Bari,
        Ruota::Cagliari,
        Ruota::Firenze,
        Ruota::Genova,
        Ruota::Milano,
        Ruota::Napoli,
        Ruota::Palermo,
        Ruota::Roma,
        Ruota::Torino,
        Ruota::Venezia,
        Ruota::Nazionale,
    ];

    /// Le dieci ruote regionali in gioco per "tutte le ruote".
    /// La Nazionale non partecipa alla giocata su tutte le ruote.
    pub const IN_GIOCO: [Ruota; 10] = [
        Ruota::Bari,
        Ruota::Cagliari,
        Ruota::Firenze,
        Ruota::Genova,
        Ruota::Milano,
        Ruota::Napoli,
        Ruota::Palermo,
        Ruota::Roma,
        Ruota::Torino,
        Ruota::Venezia,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Ruota::Bari => "bari",
            Ruota::Cagliari => "cagliari",
            Ruota::Firenze => "firenze",
            Ruota::Genova => "genova",
            Ruota::Milano => "milano",
            Ruota::Napoli => "napoli",
            Ruota::Palermo => "palermo",
            Ruota::Roma => "roma",
            Ruota::Torino => "torino",
            Ruota::Venezia => "venezia",
            Ruota::Nazionale => "nazionale",
        }
    }
}

impl fmt::Display for Ruota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Ruota {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_lowercase();
        for ruota in Ruota::ALL {
            if ruota.as_str() == s {
                return Ok(ruota);
            }
        }
        bail!("Ruota sconosciuta: '{}'", s);
    }
}

/// Ruota scelta per una giocata: una ruota singola oppure tutte le ruote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiocoRuota {
    Singola(Ruota),
    Tutte,
}

impl GiocoRuota {
    pub fn ruote_in_gioco(&self) -> u64 {
        match self {
            GiocoRuota::Singola(_) => 1,
            GiocoRuota::Tutte => Ruota::IN_GIOCO.len() as u64,
        }
    }
}

impl fmt::Display for GiocoRuota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GiocoRuota::Singola(r) => write!(f, "{}", r),
            GiocoRuota::Tutte => write!(f, "tutte"),
        }
    }
}

impl FromStr for GiocoRuota {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim().to_lowercase();
        if trimmed == "tutte" {
            return Ok(GiocoRuota::Tutte);
        }
        Ok(GiocoRuota::Singola(trimmed.parse()?))
    }
}

/// Tipo di giocata, per cardinalità crescente.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipoGiocata {
    Ambo,
    Terno,
    Quaterna,
    Cinquina,
}

impl TipoGiocata {
    pub fn cardinalita(&self) -> usize {
        match self {
            TipoGiocata::Ambo => 2,
            TipoGiocata::Terno => 3,
            TipoGiocata::Quaterna => 4,
            TipoGiocata::Cinquina => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TipoGiocata::Ambo => "ambo",
            TipoGiocata::Terno => "terno",
            TipoGiocata::Quaterna => "quaterna",
            TipoGiocata::Cinquina => "cinquina",
        }
    }
}

impl fmt::Display for TipoGiocata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TipoGiocata {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ambo" => Ok(TipoGiocata::Ambo),
            "terno" => Ok(TipoGiocata::Terno),
            "quaterna" => Ok(TipoGiocata::Quaterna),
            "cinquina" => Ok(TipoGiocata::Cinquina),
            other => bail!("Tipo di giocata sconosciuto: '{}'", other),
        }
    }
}

/// Una estrazione finalizzata: un concorso con la cinquina di ogni ruota.
/// Immutabile una volta registrata.
#[derive(Debug, Clone)]
pub struct Estrazione {
    pub concorso: u32,
    pub data: String,
    pub ruote: Vec<(Ruota, [u8; 5])>,
}

impl Estrazione {
    pub fn numeri(&self, ruota: Ruota) -> Option<&[u8; 5]> {
        self.ruote
            .iter()
            .find(|(r, _)| *r == ruota)
            .map(|(_, n)| n)
    }
}

/// Frequenza e ritardo di un numero su una ruota (derivato, non persistito).
#[derive(Debug, Clone)]
pub struct StatoNumero {
    pub numero: u8,
    pub frequenza: u32,
    pub ritardo: u32,
}

/// Tabelle di frequenza e ritardo su una finestra di estrazioni.
/// `con_storico` distingue la finestra vuota (tutti zero) da una finestra
/// reale in cui un numero è semplicemente assente.
#[derive(Debug, Clone)]
pub struct Statistiche {
    pub finestra: u32,
    pub con_storico: bool,
    pub numeri: Vec<StatoNumero>,
}

/// Probabilità esatta di vincita come rapporto favorevoli/possibili.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probabilita {
    pub favorevoli: u64,
    pub possibili: u64,
}

impl fmt::Display for Probabilita {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} su {}", self.favorevoli, self.possibili)
    }
}

/// Una combinazione generata, con i numeri in ordine crescente.
#[derive(Debug, Clone)]
pub struct Combinazione {
    pub numeri: Vec<u8>,
    pub tipo: TipoGiocata,
    pub gioco: GiocoRuota,
    pub probabilita: Probabilita,
}

pub fn validate_cinquina(numeri: &[u8; 5]) -> Result<()> {
    for &n in numeri {
        if n < 1 || n > 90 {
            bail!("Numero {} fuori intervallo (1-90)", n);
        }
    }
    for i in 0..numeri.len() {
        for j in (i + 1)..numeri.len() {
            if numeri[i] == numeri[j] {
                bail!("Numero duplicato: {}", numeri[i]);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_cinquina_ok() {
        assert!(validate_cinquina(&[1, 2, 3, 4, 5]).is_ok());
        assert!(validate_cinquina(&[86, 87, 88, 89, 90]).is_ok());
        assert!(validate_cinquina(&[3, 17, 42, 55, 90]).is_ok());
    }

    #[test]
    fn test_validate_cinquina_out_of_range() {
        assert!(validate_cinquina(&[0, 2, 3, 4, 5]).is_err());
        assert!(validate_cinquina(&[1, 2, 3, 4, 91]).is_err());
    }

    #[test]
    fn test_validate_cinquina_duplicates() {
        assert!(validate_cinquina(&[1, 1, 3, 4, 5]).is_err());
        assert!(validate_cinquina(&[10, 20, 30, 40, 40]).is_err());
    }

    #[test]
    fn test_ruota_parse_roundtrip() {
        for ruota in Ruota::ALL {
            assert_eq!(ruota.as_str().parse::<Ruota>().unwrap(), ruota);
        }
        assert_eq!("  MILANO ".parse::<Ruota>().unwrap(), Ruota::Milano);
    }

    #[test]
    fn test_ruota_parse_unknown() {
        assert!("monza".parse::<Ruota>().is_err());
        assert!("".parse::<Ruota>().is_err());
    }

    #[test]
    fn test_gioco_ruota_parse() {
        assert_eq!("tutte".parse::<GiocoRuota>().unwrap(), GiocoRuota::Tutte);
        assert_eq!(
            "bari".parse::<GiocoRuota>().unwrap(),
            GiocoRuota::Singola(Ruota::Bari)
        );
        assert!("monza".parse::<GiocoRuota>().is_err());
    }

    #[test]
    fn test_ruote_in_gioco() {
        assert_eq!(GiocoRuota::Singola(Ruota::Roma).ruote_in_gioco(), 1);
        assert_eq!(GiocoRuota::Tutte.ruote_in_gioco(), 10);
    }

    #[test]
    fn test_tipo_cardinalita() {
        assert_eq!(TipoGiocata::Ambo.cardinalita(), 2);
        assert_eq!(TipoGiocata::Terno.cardinalita(), 3);
        assert_eq!(TipoGiocata::Quaterna.cardinalita(), 4);
        assert_eq!(TipoGiocata::Cinquina.cardinalita(), 5);
    }

    #[test]
    fn test_tipo_parse() {
        assert_eq!("ambo".parse::<TipoGiocata>().unwrap(), TipoGiocata::Ambo);
        assert_eq!(
            "CINQUINA".parse::<TipoGiocata>().unwrap(),
            TipoGiocata::Cinquina
        );
        assert!("sestina".parse::<TipoGiocata>().is_err());
    }

    #[test]
    fn test_estrazione_numeri() {
        let estrazione = Estrazione {
            concorso: 5024,
            data: "2025-08-17".to_string(),
            ruote: vec![
                (Ruota::Bari, [3, 17, 42, 55, 90]),
                (Ruota::Milano, [1, 2, 3, 4, 5]),
            ],
        };
        assert_eq!(estrazione.numeri(Ruota::Bari), Some(&[3, 17, 42, 55, 90]));
        assert_eq!(estrazione.numeri(Ruota::Roma), None);
    }
}
