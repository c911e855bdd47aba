//! Positive and negative example lists

use super::kb::hotel_iri;
use crate::generator::Hotel;

/// One hotel IRI per line
pub fn label_list(hotels: &[Hotel]) -> String {
    hotels.iter().map(|hotel| hotel_iri(hotel) + "\n").collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{HotelLayoutGenerator, HotelSettings};

    #[test]
    fn test_label_list_lines() {
        let samples = HotelLayoutGenerator::with_seed(HotelSettings::default(), 31).generate(3, 0);
        let list = label_list(&samples.positive);

        let lines: Vec<&str> = list.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], hotel_iri(&samples.positive[0]));
        assert!(lines.iter().all(|l| l.starts_with("http://dl-learner.org/spatial#feature_hotel")));
        assert!(list.ends_with('\n'));
    }

    #[test]
    fn test_empty_label_list() {
        assert_eq!(label_list(&[]), "");
    }
}
