use crate::core::corpus::Corpus;
use crate::core::types::Disease;
use crate::parsing::table::{parse_rows, ParseError, Row};

/// Parse disease table text (`disease,symptom1,symptom2,...`) into a corpus
///
/// # Errors
///
/// Returns `ParseError::TooManyRows` if the row limit is exceeded.
pub fn parse_disease_table(text: &str) -> Result<Corpus, ParseError> {
    Ok(corpus_from_rows(parse_rows(text)?))
}

/// Every row contributes one occurrence; its fields append to the symptom set.
pub fn corpus_from_rows(rows: Vec<Row>) -> Corpus {
    let mut corpus = Corpus::new();
    for row in rows {
        corpus.add_row(Disease::new(row.disease), row.fields);
    }
    corpus
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_disease_table() {
        let corpus = parse_disease_table(
            "Flu,fever,cough\nMalaria,fever,chills\nMalaria,fever,chills\n",
        )
        .unwrap();

        let malaria = Disease::new("Malaria");
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.total_rows(), 3);
        assert_eq!(corpus.occurrences(&malaria), 2);
        assert_eq!(
            corpus.symptoms(&malaria).unwrap(),
            &["fever", "chills", "fever", "chills"]
        );
    }

    #[test]
    fn test_trailing_comma_does_not_grow_symptom_set() {
        use crate::matching::likelihood::LikelihoodScorer;
        use crate::matching::scoring::Scorer;

        let corpus = parse_disease_table("Flu,fever,\nCold,fever,cough\n").unwrap();
        let flu = Disease::new("Flu");
        assert_eq!(corpus.symptoms(&flu).unwrap(), &["fever"]);

        // ln(1/2) + ln(1/2) for Flu beats ln(1/2) + ln(1/3) for Cold
        let best = LikelihoodScorer.best(&corpus, &["fever".to_string()], None);
        assert_eq!(best, Some(flu));
    }

    #[test]
    fn test_parse_disease_table_empty() {
        let corpus = parse_disease_table("").unwrap();
        assert!(corpus.is_empty());
        assert_eq!(corpus.total_rows(), 0);
    }
}
