use criterion::{Criterion, criterion_group, criterion_main};

use biodesign_validate::model::{
    Component, ComponentDefinition, Identified, Location, Range, Sequence, SequenceAnnotation,
};
use biodesign_validate::ontology::terms;
use biodesign_validate::{Document, ValidationOptions, validate_document};

/// A medium document: a chain of definitions, each annotated and backed by a
/// resolving sequence.
fn synthesize(definitions: usize) -> Document {
    let mut doc = Document::new();
    for i in 0..definitions {
        let id = format!("urn:bench/cd{i}/1");
        let mut cd = ComponentDefinition::new(Identified::compliant("urn:bench", &format!("cd{i}"), "1"));
        if i + 1 < definitions {
            cd.components.push(Component::new(
                Identified::new(format!("{id}/c")),
                format!("urn:bench/cd{}/1", i + 1),
            ));
        }
        let mut sa = SequenceAnnotation::new(Identified::new(format!("{id}/sa")));
        sa.locations.push(Location::Range(Range {
            ident: Identified::new(format!("{id}/loc")),
            start: 1,
            end: 16,
            orientation: None,
        }));
        cd.sequence_annotations.push(sa);
        cd.sequences.push(format!("urn:bench:seq{i}").into());
        doc.add_component_definition(cd).unwrap();
        doc.add_sequence(Sequence::new(
            Identified::new(format!("urn:bench:seq{i}")),
            "acgtacgtacgtacgt",
            terms::ENCODING_IUPAC_DNA,
        ))
        .unwrap();
    }
    doc
}

fn bench_validate(c: &mut Criterion) {
    let doc = synthesize(200);
    let options = ValidationOptions::default();
    c.bench_function("validate_200_definitions", |b| {
        b.iter(|| validate_document(&doc, &options))
    });
}

criterion_group!(benches, bench_validate);
criterion_main!(benches);
