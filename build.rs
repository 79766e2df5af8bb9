use std::path::Path;

const DATA_FILES: [&str; 5] = [
    "data/disease_data.csv",
    "data/doctors_data.csv",
    "data/precautions_data.csv",
    "data/tablets_data.csv",
    "data/reasons_data.csv",
];

fn main() {
    for file in DATA_FILES {
        validate_table_file(Path::new(file));
    }
    validate_disease_table(Path::new(DATA_FILES[0]));
    set_build_dependencies();
}

fn read_table(path: &Path) -> String {
    // Ensure table exists at build time
    assert!(
        path.exists(),
        "\n\nDATA BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the embedded data table before building.\n",
        path.display()
    );

    std::fs::read_to_string(path).unwrap_or_else(|e| {
        panic!(
            "\n\nDATA BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            path.display()
        );
    })
}

fn validate_table_file(path: &Path) {
    let contents = read_table(path);

    for (i, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let disease = line.split(',').next().unwrap_or("").trim();
        assert!(
            !disease.is_empty(),
            "\n\nDATA BUILD ERROR: Empty disease name\n\
             Path: {}\n\
             Line: {}\n\
             Hint: The first field of every row must name a disease.\n",
            path.display(),
            i + 1
        );
    }
}

fn validate_disease_table(path: &Path) {
    let contents = read_table(path);

    let rows = contents
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .count();
    assert!(
        rows > 0,
        "\n\nDATA BUILD ERROR: Disease table is empty\n\
         Path: {}\n\
         The embedded dataset needs at least one disease row.\n",
        path.display()
    );

    let symptoms = contents
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| l.split(',').skip(1).filter(|s| !s.trim().is_empty()).count())
        .sum::<usize>();

    println!("cargo:warning=Validated embedded dataset: {rows} disease rows, {symptoms} symptom entries");
}

fn set_build_dependencies() {
    // Tell cargo to rerun if any embedded table changes
    for file in DATA_FILES {
        println!("cargo:rerun-if-changed={file}");
    }

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
