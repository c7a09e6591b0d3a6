use glfast::classifier::{Classification, Classifier};
use glfast::config::TemplateConfig;
use indexmap::IndexSet;

fn set(items: &[&str]) -> IndexSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_default_classification() {
    let classifier = Classifier::default();

    assert_eq!(classifier.classify("src/main.go"), Classification::Template);
    assert_eq!(classifier.classify("README.MD"), Classification::Template);
    assert_eq!(
        classifier.classify("deploy/Dockerfile"),
        Classification::Template
    );
    assert_eq!(classifier.classify("Makefile"), Classification::Template);

    assert_eq!(
        classifier.classify("app/keystore.jks"),
        Classification::Base64
    );
    assert_eq!(classifier.classify("logo.PNG"), Classification::Base64);
    assert_eq!(
        classifier.classify("gradle/wrapper/gradle-wrapper.jar"),
        Classification::Base64
    );

    assert_eq!(classifier.classify(".gitignore"), Classification::Text);
    assert_eq!(classifier.classify("LICENSE"), Classification::Text);
    assert_eq!(classifier.classify("config.toml"), Classification::Text);
    assert_eq!(classifier.classify("Dockerfile.dev"), Classification::Text);
}

#[test]
fn test_classification_is_stable() {
    let classifier = Classifier::default();
    for path in ["a.go", "b.jks", "c.txt"] {
        assert_eq!(classifier.classify(path), classifier.classify(path));
    }
}

#[test]
fn test_base64_wins_over_template() {
    let config = TemplateConfig {
        extensions: set(&[".svg", ".md"]),
        base64_extensions: set(&["SVG"]),
        ..TemplateConfig::default()
    };
    assert_eq!(
        config.clone().normalized().ambiguous_extensions(),
        vec![".svg"]
    );

    let classifier = Classifier::new(&config);
    assert_eq!(classifier.classify("icon.svg"), Classification::Base64);
    assert_eq!(classifier.classify("README.md"), Classification::Template);
}

#[test]
fn test_custom_sets_replace_defaults() {
    let config = TemplateConfig {
        extensions: set(&["rs"]),
        base64_extensions: set(&[".ico"]),
        files: set(&["Jenkinsfile"]),
        ..TemplateConfig::default()
    };
    let classifier = Classifier::new(&config);

    assert_eq!(classifier.classify("src/lib.rs"), Classification::Template);
    assert_eq!(classifier.classify("Jenkinsfile"), Classification::Template);
    assert_eq!(classifier.classify("favicon.ico"), Classification::Base64);
    assert_eq!(classifier.classify("main.go"), Classification::Text);
    assert_eq!(classifier.classify("logo.png"), Classification::Text);
    assert_eq!(classifier.classify("Dockerfile"), Classification::Text);
}
