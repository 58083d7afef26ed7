//! End-to-end export runs against real model directories.

use prost::Message;
use serde_json::{json, Value};
use spexport::io::format::{ADDED_TOKENS_FILE, CONFIG_FILE, EXPORT_FILE, TOKENIZER_CONFIG_FILE};
use spexport::io::model::{ModelProto, PieceType, SentencePiece};
use spexport::{load_export, ExportError, Exporter, SpecialRole, TokenType};
use std::path::Path;
use tempfile::TempDir;

fn write_model(dir: &Path, pieces: &[(&str, f32, PieceType)]) {
    let proto = ModelProto {
        pieces: pieces
            .iter()
            .map(|&(piece, score, kind)| SentencePiece::new(piece, score, kind))
            .collect(),
    };
    std::fs::write(dir.join("tokenizer.model"), proto.encode_to_vec()).unwrap();
}

fn write_json(dir: &Path, name: &str, value: Value) {
    std::fs::write(dir.join(name), serde_json::to_string_pretty(&value).unwrap()).unwrap();
}

/// A small llama-style vocabulary: unk, bos, eos, two bytes, a few words.
fn llama_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_model(
        dir.path(),
        &[
            ("<unk>", 0.0, PieceType::Unknown),
            ("<s>", 0.0, PieceType::Control),
            ("</s>", 0.0, PieceType::Control),
            ("<0x00>", 0.0, PieceType::Byte),
            ("<0x01>", 0.0, PieceType::Byte),
            ("\u{2581}the", -1.0, PieceType::Normal),
            ("\u{2581}a", -2.0, PieceType::Normal),
            ("ing", -3.0, PieceType::Normal),
        ],
    );
    dir
}

#[test]
fn test_base_vocabulary_only() {
    let dir = llama_dir();
    let report = Exporter::builder(dir.path()).build().run().unwrap();

    assert_eq!(report.vocab_size, 8);
    assert_eq!(report.padded, 0);
    assert_eq!(report.output, dir.path().join(EXPORT_FILE));

    let doc = load_export(&report.output).unwrap();
    assert_eq!(doc.tokens.len(), 8);
    assert!(doc.tokens.is_dense());
    assert_eq!(doc.tokens.get(0).unwrap().kind, TokenType::Unknown);
    assert_eq!(doc.tokens.get(1).unwrap().kind, TokenType::Control);
    assert_eq!(doc.tokens.get(3).unwrap().kind, TokenType::Byte);
    assert_eq!(doc.tokens.get(5).unwrap().piece, "\u{2581}the");
    assert_eq!(doc.tokens.get(6).unwrap().score, -2.0);
    assert!(doc.special_tokens.is_empty());
    assert!(doc.add_special_tokens.is_empty());
    assert!(doc.chat_template.is_none());
}

#[test]
fn test_override_precedence() {
    let dir = llama_dir();
    write_json(
        dir.path(),
        ADDED_TOKENS_FILE,
        json!({ "<tool>": 6, "<think>": 7, "<far>": 40 }),
    );
    write_json(
        dir.path(),
        TOKENIZER_CONFIG_FILE,
        json!({
            "added_tokens_decoder": {
                "7": { "content": "<|im_end|>", "special": true },
                "5": { "content": "\u{2581}hello", "special": false },
                "99": { "content": "<gone>", "special": true }
            }
        }),
    );

    let report = Exporter::builder(dir.path()).build().run().unwrap();
    assert_eq!(report.skipped_overrides, 2);

    let doc = load_export(&report.output).unwrap();
    assert_eq!(doc.tokens.len(), 8);

    let tool = doc.tokens.get(6).unwrap();
    assert_eq!(tool.piece, "<tool>");
    assert_eq!(tool.kind, TokenType::UserDefined);
    assert_eq!(tool.score, -1000.0);

    let im_end = doc.tokens.get(7).unwrap();
    assert_eq!(im_end.piece, "<|im_end|>");
    assert_eq!(im_end.kind, TokenType::Control);
    assert!(im_end.is_control);

    let hello = doc.tokens.get(5).unwrap();
    assert_eq!(hello.piece, " hello");
    assert_eq!(hello.kind, TokenType::UserDefined);

    assert!(doc.tokens.iter().all(|(_, e)| e.piece != "<far>" && e.piece != "<gone>"));
}

#[test]
fn test_special_tokens_flags_and_template() {
    let dir = llama_dir();
    write_json(
        dir.path(),
        TOKENIZER_CONFIG_FILE,
        json!({
            "bos_token": { "content": "<s>", "lstrip": false },
            "eos_token": "</s>",
            "unk_token": "<unk>",
            "pad_token_id": 7,
            "add_bos_token": true,
            "add_eos_token": false,
            "chat_template": "{% for message in messages %}{{ message['content'] }}{% endfor %}"
        }),
    );
    write_json(
        dir.path(),
        CONFIG_FILE,
        json!({
            "pad_token_id": 0,
            "mask_token_id": 3,
            "sep_token_id": 100,
            "chat_template": "ignored"
        }),
    );

    let report = Exporter::builder(dir.path()).build().run().unwrap();
    let doc = load_export(&report.output).unwrap();

    assert_eq!(doc.special_tokens.get(&SpecialRole::Unk), Some(&0));
    assert_eq!(doc.special_tokens.get(&SpecialRole::Bos), Some(&1));
    assert_eq!(doc.special_tokens.get(&SpecialRole::Eos), Some(&2));
    assert_eq!(doc.special_tokens.get(&SpecialRole::Pad), Some(&7));
    assert_eq!(doc.special_tokens.get(&SpecialRole::Mask), Some(&3));
    assert!(!doc.special_tokens.contains_key(&SpecialRole::Sep));
    assert!(!doc.special_tokens.contains_key(&SpecialRole::Cls));

    assert_eq!(doc.add_special_tokens.get(&SpecialRole::Bos), Some(&true));
    assert_eq!(doc.add_special_tokens.get(&SpecialRole::Eos), Some(&false));
    assert_eq!(doc.add_special_tokens.len(), 2);

    assert!(doc.chat_template.unwrap().starts_with("{% for message"));
    assert_eq!(
        report.special_roles,
        [
            SpecialRole::Unk,
            SpecialRole::Pad,
            SpecialRole::Bos,
            SpecialRole::Eos,
            SpecialRole::Mask
        ]
    );
}

#[test]
fn test_add_flags_ignore_fallback_config() {
    let dir = llama_dir();
    write_json(dir.path(), CONFIG_FILE, json!({ "add_bos_token": true }));

    let report = Exporter::builder(dir.path()).build().run().unwrap();
    let doc = load_export(&report.output).unwrap();
    assert!(doc.add_special_tokens.is_empty());
}

#[test]
fn test_padding_to_requested_vocab_size() {
    let dir = tempfile::tempdir().unwrap();
    write_model(
        dir.path(),
        &[
            ("<unk>", 0.0, PieceType::Unknown),
            ("<s>", 0.0, PieceType::Control),
            ("a", -1.0, PieceType::Normal),
        ],
    );

    let report = Exporter::builder(dir.path()).vocab_size(5).build().run().unwrap();
    assert_eq!(report.padded, 2);

    let doc = load_export(&report.output).unwrap();
    assert_eq!(doc.tokens.len(), 5);
    assert_eq!(doc.tokens.get(3).unwrap().piece, "[PAD1]");
    assert_eq!(doc.tokens.get(4).unwrap().piece, "[PAD2]");
    assert_eq!(doc.tokens.get(4).unwrap().kind, TokenType::Unused);
    assert!(doc.tokens.get(4).unwrap().is_unused);
}

#[test]
fn test_added_token_beyond_model_but_within_target_size() {
    let dir = tempfile::tempdir().unwrap();
    write_model(
        dir.path(),
        &[("<unk>", 0.0, PieceType::Unknown), ("a", -1.0, PieceType::Normal)],
    );
    write_json(dir.path(), ADDED_TOKENS_FILE, json!({ "<extra>": 3 }));

    let report = Exporter::builder(dir.path()).vocab_size(5).build().run().unwrap();
    let doc = load_export(&report.output).unwrap();

    assert!(doc.tokens.is_dense());
    assert_eq!(doc.tokens.get(2).unwrap().piece, "[PAD1]");
    assert_eq!(doc.tokens.get(3).unwrap().piece, "<extra>");
    assert_eq!(doc.tokens.get(4).unwrap().piece, "[PAD2]");
}

#[test]
fn test_repeated_runs_are_byte_identical() {
    let dir = llama_dir();
    write_json(dir.path(), ADDED_TOKENS_FILE, json!({ "<b>": 7, "<a>": 6 }));
    write_json(
        dir.path(),
        TOKENIZER_CONFIG_FILE,
        json!({ "eos_token": "</s>", "add_eos_token": true, "chat_template": "héllo ✓" }),
    );

    let exporter = Exporter::builder(dir.path()).build();
    let first = exporter.run().unwrap();
    let first_bytes = std::fs::read(&first.output).unwrap();
    let second = exporter.run().unwrap();
    let second_bytes = std::fs::read(&second.output).unwrap();

    assert_eq!(first_bytes, second_bytes);
    let text = String::from_utf8(first_bytes).unwrap();
    assert!(text.contains("héllo ✓"));
    assert!(text.contains("\u{2581}the"));
}

#[test]
fn test_custom_output_and_model_file() {
    let dir = tempfile::tempdir().unwrap();
    let proto = ModelProto {
        pieces: vec![SentencePiece::new("<unk>", 0.0, PieceType::Unknown)],
    };
    std::fs::write(dir.path().join("sp.model"), proto.encode_to_vec()).unwrap();
    let output = dir.path().join("out").join("export.json");

    let report = Exporter::builder(dir.path())
        .model_file("sp.model")
        .output(&output)
        .build()
        .run()
        .unwrap();

    assert_eq!(report.output, output);
    assert!(output.is_file());
    assert!(!dir.path().join(EXPORT_FILE).exists());
}

#[test]
fn test_ids_beyond_i64_are_skipped_not_fatal() {
    let dir = llama_dir();
    std::fs::write(
        dir.path().join(ADDED_TOKENS_FILE),
        r#"{"<huge>": 18446744073709551615, "<tool>": 6}"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join(TOKENIZER_CONFIG_FILE),
        r#"{"added_tokens_decoder": {"99999999999999999999": {"content": "<gone>", "special": true}}}"#,
    )
    .unwrap();

    let report = Exporter::builder(dir.path()).build().run().unwrap();
    assert_eq!(report.skipped_overrides, 2);

    let doc = load_export(&report.output).unwrap();
    assert_eq!(doc.tokens.len(), 8);
    assert_eq!(doc.tokens.get(6).unwrap().piece, "<tool>");
    assert!(doc.tokens.iter().all(|(_, e)| e.piece != "<huge>" && e.piece != "<gone>"));
}

#[test]
fn test_malformed_side_file_is_fatal() {
    let dir = llama_dir();
    std::fs::write(dir.path().join(ADDED_TOKENS_FILE), "{ \"<x>\": ").unwrap();

    let err = Exporter::builder(dir.path()).build().run().unwrap_err();
    assert!(matches!(err, ExportError::Parse { .. }));
    assert!(!dir.path().join(EXPORT_FILE).exists());
}

#[test]
fn test_undecodable_model_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("tokenizer.model"), [0x0a, 0xff]).unwrap();

    let err = Exporter::builder(dir.path()).build().run().unwrap_err();
    assert!(matches!(err, ExportError::ModelDecode { .. }));
}
