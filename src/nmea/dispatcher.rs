use log::debug;

use super::fix_record::FixRecord;
use super::parsers::{gga, gll, rmc, vtg, FieldReport, Fields};
use super::sentence::{ParseOutcome, ParseReport, SentenceKind};
use crate::utils::error::NmeaError;

type FieldParser = fn(&Fields<'_>, &mut FixRecord) -> FieldReport;

/// Kind → parser. Supporting another sentence type means adding a
/// `SentenceKind` variant and a row here.
const PARSERS: [(SentenceKind, FieldParser); 4] = [
    (SentenceKind::Gga, gga::parse),
    (SentenceKind::Gll, gll::parse),
    (SentenceKind::Vtg, vtg::parse),
    (SentenceKind::Rmc, rmc::parse),
];

fn parser_for(kind: SentenceKind) -> Option<FieldParser> {
    PARSERS
        .iter()
        .find(|(candidate, _)| *candidate == kind)
        .map(|(_, parser)| *parser)
}

/// Payload between `$` and `*`, tolerating a missing terminator.
fn payload(sentence: &str) -> Option<&str> {
    let inner = sentence.trim_end_matches(['\r', '\n']).strip_prefix('$')?;
    Some(inner.split_once('*').map_or(inner, |(body, _)| body))
}

/// Routes a validated sentence to its field parser and applies it to `record`.
pub fn parse(sentence: &str, record: &mut FixRecord) -> ParseOutcome {
    parse_detailed(sentence, record).outcome
}

/// [`parse`] with the sentence kind and every skipped field.
pub fn parse_detailed(sentence: &str, record: &mut FixRecord) -> ParseReport {
    let Some(body) = payload(sentence) else {
        return ParseReport::unsupported();
    };
    let fields = Fields::new(body);

    let Some((kind, parser)) = SentenceKind::from_code(fields.code())
        .and_then(|kind| parser_for(kind).map(|parser| (kind, parser)))
    else {
        debug!("{}", NmeaError::UnsupportedSentenceType(fields.code().to_string()));
        return ParseReport::unsupported();
    };

    let report = parser(&fields, record).into_report();
    for error in &report.field_errors {
        debug!("⚠️ {} partially applied: {}", kind, error);
    }
    report
}
