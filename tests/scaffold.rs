//! End-to-end generation through the library against the shipped templates.

mod common;

use common::shipped_templates;
use pmaker::executor::{DirOutcome, FileOutcome, RepoOutcome};
use pmaker::prompt::ScriptedConfirmer;
use pmaker::repo::RepoInitializer;
use pmaker::templates::DirTemplates;
use pmaker::{plan, ConfigTable, Executor, GenerationRequest};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct NoRepo;

impl RepoInitializer for NoRepo {
    fn init(&self, path: &Path) -> pmaker::Result<()> {
        panic!("repository init not expected for {}", path.display());
    }
}

fn demo_request(root: PathBuf) -> GenerationRequest {
    let mut request = GenerationRequest::new("demo", "cpp");
    request.root = root;
    request.flags.insert("stdcpp11".to_string());
    request.libraries.insert("boost".to_string());
    request
}

#[test]
fn cpp_demo_with_boost_end_to_end() {
    let temp = TempDir::new().expect("tempdir");
    let root = temp.path().join("demo");
    let table = ConfigTable::builtin();
    table.validate().expect("table");
    let templates = DirTemplates::new(shipped_templates());
    let request = demo_request(root.clone());

    let plan = plan(&table, &request, &templates).expect("plan");
    let mut confirmer = ScriptedConfirmer::default();
    let report = Executor::new(&mut confirmer, &NoRepo)
        .execute(&plan, &request)
        .expect("execute");

    assert!(confirmer.asked.is_empty(), "fresh tree asks nothing");
    assert!(report
        .directories
        .iter()
        .all(|dir| dir.outcome == DirOutcome::Created));
    for rel in ["source", "projects", "bin", "source/inc", "source/src"] {
        assert!(root.join(rel).is_dir(), "missing {rel}");
    }

    let cmake = fs::read_to_string(root.join("source/CMakeLists.txt")).expect("cmake");
    assert!(cmake.contains("project(demo LANGUAGES CXX)"), "{cmake}");
    assert!(cmake.contains("add_executable(demo ${PM_SOURCES})"));
    assert!(cmake.contains("set(CMAKE_CXX_STANDARD 11)"));
    assert!(cmake.contains("find_package(Boost REQUIRED"));
    assert!(cmake.contains("file(GLOB PM_SOURCES src/*.cpp)"));
    assert!(!cmake.contains("#PM_PROJECT_NAME#"));
    assert!(cmake.contains("#PM_FLAG_STDCPP17#"));

    let main = fs::read_to_string(root.join("source/src/main.cpp")).expect("main");
    assert!(main.contains("Hello from demo!"));
    let gitignore = fs::read_to_string(root.join("source/.gitignore")).expect("gitignore");
    let template = fs::read_to_string(shipped_templates().join("gitignore")).expect("template");
    assert_eq!(gitignore, template);
    assert_eq!(report.repository, RepoOutcome::NotRequested);
}

#[test]
fn second_run_keeps_user_edits_unless_confirmed() {
    let temp = TempDir::new().expect("tempdir");
    let root = temp.path().join("demo");
    let table = ConfigTable::builtin();
    let templates = DirTemplates::new(shipped_templates());
    let request = demo_request(root.clone());
    let plan = plan(&table, &request, &templates).expect("plan");

    let mut first = ScriptedConfirmer::default();
    Executor::new(&mut first, &NoRepo)
        .execute(&plan, &request)
        .expect("first run");

    let cmake_path = root.join("source/CMakeLists.txt");
    fs::write(&cmake_path, "# edited\n").expect("edit");

    // gitignore: keep, CMakeLists: keep, main.cpp: keep
    let mut decline = ScriptedConfirmer::new([false, false, false]);
    let report = Executor::new(&mut decline, &NoRepo)
        .execute(&plan, &request)
        .expect("second run");
    assert_eq!(decline.asked.len(), 3);
    assert!(report
        .directories
        .iter()
        .all(|dir| dir.outcome == DirOutcome::Existing));
    assert!(report
        .files
        .iter()
        .all(|file| file.outcome == FileOutcome::Skipped));
    assert!(report.substituted.is_empty());
    assert_eq!(fs::read_to_string(&cmake_path).expect("cmake"), "# edited\n");

    // keep gitignore, overwrite CMakeLists, keep main.cpp
    let mut accept = ScriptedConfirmer::new([false, true, false]);
    Executor::new(&mut accept, &NoRepo)
        .execute(&plan, &request)
        .expect("third run");
    let cmake = fs::read_to_string(&cmake_path).expect("cmake");
    assert!(cmake.starts_with("cmake_minimum_required"));
    assert!(cmake.contains("project(demo LANGUAGES CXX)"));
}
