use crossterm::event::KeyCode;
use digital_library::{
    current_year, App, Audiobook, Catalog, CatalogError, Digital, Ebook, ValidationError,
    MIN_YEAR,
};

#[test]
fn test_documented_scenarios() {
    let mut catalog = Catalog::new();

    let quijote = Ebook::new("Don Quijote", "Cervantes", 1605, "pdf", 1200).unwrap();
    assert_eq!(
        quijote.summary(),
        "[TEXTO] Don Quijote | Autor: Cervantes (1605) | Formato: PDF (1200 págs)"
    );
    catalog.append(quijote);

    let orwell = Audiobook::new("1984", "George Orwell", 1949, "Francisco M.", 480).unwrap();
    assert_eq!(
        orwell.summary(),
        "[AUDIO] 1984 | Voz: Francisco M. | Duración: 480 min"
    );
    catalog.append(orwell);

    assert_eq!(
        Ebook::new("", "X", 2000, "PDF", 10),
        Err(ValidationError::EmptyTitle)
    );
    assert!(matches!(
        Ebook::new("T", "A", 1200, "PDF", 10),
        Err(ValidationError::YearOutOfRange { year: 1200, .. })
    ));
    assert_eq!(catalog.len(), 2);
}

#[test]
fn test_year_range_over_whole_boundary() {
    let now = current_year();
    for year in [MIN_YEAR - 100, MIN_YEAR - 1, now + 1, now + 50] {
        assert!(Ebook::new("T", "A", year, "PDF", 1).is_err(), "{year} accepted");
    }
    for year in [MIN_YEAR, MIN_YEAR + 1, 1900, now - 1, now] {
        assert!(Audiobook::new("T", "A", year, "N", 1).is_ok(), "{year} rejected");
    }
}

#[test]
fn test_access_bounds_on_populated_catalog() {
    let catalog = Catalog::with_demo_records().unwrap();
    let len = catalog.len();

    for index in [0, len + 1] {
        match catalog.access_at(index, &mut Vec::new()) {
            Err(CatalogError::NotFound { index: missing, len: size }) => {
                assert_eq!(missing, index);
                assert_eq!(size, len);
            }
            other => panic!("expected NotFound for {index}, got {other:?}"),
        }
    }

    for (index, summary) in catalog.list() {
        let mut out = Vec::new();
        catalog.access_at(index, &mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();
        if summary.starts_with("[TEXTO]") {
            assert!(printed.starts_with(">> Descargando archivo:"));
        } else {
            assert!(printed.starts_with(">> Reproduciendo stream de audio:"));
        }
    }
}

#[test]
fn test_session_registers_and_lists() {
    let mut app = App::new(Catalog::new());

    app.handle_key(KeyCode::Char('1')).unwrap();
    for value in ["Ficciones", "Borges", "1944", "mobi", "224"] {
        for ch in value.chars() {
            app.handle_key(KeyCode::Char(ch)).unwrap();
        }
        app.handle_key(KeyCode::Enter).unwrap();
    }
    app.handle_key(KeyCode::Enter).unwrap();

    let listed: Vec<_> = app.catalog().list().collect();
    assert_eq!(
        listed,
        vec![(
            1,
            "[TEXTO] Ficciones | Autor: Borges (1944) | Formato: MOBI (224 págs)".to_string()
        )]
    );
    assert!(app.handle_key(KeyCode::Char('5')).unwrap());
}
