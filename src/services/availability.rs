// src/services/availability.rs
//
// Os dois testes de sobreposição usados na admissão de reservas.
// Eles NÃO são equivalentes e cada um tem seu lugar:
//
//  * `overlaps`            -> regras do hóspede (intervalos fechados, bordas contam)
//  * `intersects_half_open` -> disponibilidade do quarto ([início, fim), bordas não contam)
//
// `db::booking_repo` repete a fórmula semiaberta em SQL.

use chrono::{DateTime, Utc};

/// Sobreposição com bordas inclusivas: `[a_start, a_end]` toca `[b_start, b_end]`.
///
/// Simétrica, e também pega o caso em que um intervalo contém o outro.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start <= b_end && a_end >= b_start
}

/// Sobreposição semiaberta: uma reserva `[existing_start, existing_end)` bloqueia
/// o pedido `[start, end)` se `existing_start < end && existing_end > start`.
/// Reservas encostadas (fim == início) não se bloqueiam.
///
/// No servidor essa checagem roda em SQL (`room_has_conflict` e a EXCLUDE
/// constraint); aqui ela serve de referência para o armazenamento em memória.
#[cfg(test)]
pub fn intersects_half_open(
    existing_start: DateTime<Utc>,
    existing_end: DateTime<Utc>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> bool {
    existing_start < end && existing_end > start
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn jan(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn overlaps_is_symmetric() {
        let ranges = [
            (jan(1), jan(3)),
            (jan(2), jan(4)),
            (jan(3), jan(5)),
            (jan(1), jan(10)),
            (jan(4), jan(5)),
            (jan(6), jan(7)),
        ];
        for &(a, b) in &ranges {
            for &(c, d) in &ranges {
                assert_eq!(overlaps(a, b, c, d), overlaps(c, d, a, b), "{a}-{b} vs {c}-{d}");
            }
        }
    }

    #[test]
    fn overlaps_counts_touching_endpoints_and_containment() {
        // bordas encostadas contam para o hóspede
        assert!(overlaps(jan(3), jan(5), jan(1), jan(3)));
        // o pedido engloba a reserva existente
        assert!(overlaps(jan(1), jan(10), jan(4), jan(5)));
        assert!(!overlaps(jan(5), jan(6), jan(1), jan(3)));
    }

    #[test]
    fn half_open_blocks_only_real_intersections() {
        let (d1, d2) = (jan(1), jan(3));

        assert!(intersects_half_open(d1, d2, jan(2), jan(4)));
        assert!(intersects_half_open(d1, d2, jan(1), jan(3)));
        assert!(intersects_half_open(d1, d2, jan(2), jan(3)));

        // adjacentes: new_start == D2 ou new_end == D1
        assert!(!intersects_half_open(d1, d2, jan(3), jan(5)));
        assert!(!intersects_half_open(jan(3), jan(5), d1, d2));
    }

    #[test]
    fn the_two_formulas_disagree_on_adjacent_ranges() {
        assert!(overlaps(jan(3), jan(5), jan(1), jan(3)));
        assert!(!intersects_half_open(jan(1), jan(3), jan(3), jan(5)));
    }
}
