// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parsing and extraction throughput on synthetic buildings
//!
//! Run with: cargo bench -p ifc-qto-extract --bench extraction

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ifc_qto_extract::{extract, ExtractOptions};
use std::fmt::Write;

/// STEP file with `storeys` levels of `per_storey` walls, slabs and furniture
fn generate_building(storeys: usize, per_storey: usize) -> String {
    let mut data = String::from(
        "ISO-10303-21;\nHEADER;\nFILE_DESCRIPTION((''),'2;1');\nFILE_SCHEMA(('IFC4'));\nENDSEC;\nDATA;\n\
         #1=IFCPROJECT('project',$,'Bench',$,$,$,$,$,#2);\n\
         #2=IFCUNITASSIGNMENT((#3));\n\
         #3=IFCSIUNIT(*,.LENGTHUNIT.,.MILLI.,.METRE.);\n",
    );

    let mut next = 10u64;
    for s in 0..storeys {
        let storey = next;
        let _ = writeln!(
            data,
            "#{storey}=IFCBUILDINGSTOREY('st{s}',$,'Level {s}',$,$,$,$,$,.ELEMENT.,{}.);",
            s * 3000
        );
        next += 1;

        let mut contained = Vec::with_capacity(per_storey * 3);
        for e in 0..per_storey {
            let (wall, slab, desk, quantity, qset) = (next, next + 1, next + 2, next + 3, next + 4);
            let _ = writeln!(data, "#{wall}=IFCWALL('w{s}_{e}',$,'Wall {e}',$,'Basic Wall',$,$,$,.SOLIDWALL.);");
            let _ = writeln!(data, "#{slab}=IFCSLAB('s{s}_{e}',$,'Slab {e}',$,$,$,$,$,.FLOOR.);");
            let _ = writeln!(data, "#{desk}=IFCFURNITURE('f{s}_{e}',$,'Desk {e}',$,$,$,$,$,$);");
            let _ = writeln!(data, "#{quantity}=IFCQUANTITYVOLUME('NetVolume',$,$,{}.,$);", 1_000_000 + e);
            let _ = writeln!(data, "#{qset}=IFCELEMENTQUANTITY('q{s}_{e}',$,'Qto',$,$,(#{quantity}));");
            let _ = writeln!(data, "#{}=IFCRELDEFINESBYPROPERTIES('d{s}_{e}',$,$,$,(#{wall}),#{qset});", next + 5);
            contained.extend([wall, slab, desk]);
            next += 6;
        }

        let refs: Vec<String> = contained.iter().map(|id| format!("#{id}")).collect();
        let _ = writeln!(
            data,
            "#{next}=IFCRELCONTAINEDINSPATIALSTRUCTURE('c{s}',$,$,$,({}),#{storey});",
            refs.join(",")
        );
        next += 1;
    }

    data.push_str("ENDSEC;\nEND-ISO-10303-21;\n");
    data
}

fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");

    let scenarios = [(2, 50, "100_elements"), (10, 100, "3k_elements"), (20, 500, "30k_elements")];

    for (storeys, per_storey, name) in scenarios {
        let content = generate_building(storeys, per_storey);
        group.throughput(Throughput::Bytes(content.len() as u64));

        group.bench_with_input(BenchmarkId::new("parse", name), &content, |b, content| {
            b.iter(|| ifc_qto_parser::parse(black_box(content.as_bytes())))
        });

        let model = match ifc_qto_parser::parse(content.as_bytes()) {
            Ok(model) => model,
            Err(e) => panic!("synthetic building failed to parse: {e}"),
        };
        group.bench_with_input(BenchmarkId::new("extract", name), &model, |b, model| {
            b.iter(|| extract(black_box(model.as_ref()), &ExtractOptions::default()))
        });

        group.bench_with_input(BenchmarkId::new("csv", name), &model, |b, model| {
            let table = extract(model.as_ref(), &ExtractOptions::default());
            b.iter(|| black_box(&table).to_csv())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_extraction);
criterion_main!(benches);
