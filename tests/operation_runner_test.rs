// ==========================================
// 操作调度集成测试
// ==========================================
// 测试目标: import / clean / check / full 的组合行为
// ==========================================


use order_import::logging;
use order_import::repository::{CustomerRepository, OrderRepository};
use order_import::{AppError, CustomerId, ImportError, Operation, OperationReport, OperationRunner};
use test_helpers::TestEnv;

#[test]
fn test_full_reports_single_overage() {
    logging::init_test();
    let env = TestEnv::new();
    env.write_customers(&["Alice\t1000.00"]);
    env.write_orders(&["Alice\t2024-01-01\t1200.00"]);

    let runner = OperationRunner::new(env.config.clone());
    let report = runner.run(Operation::Full).expect("full should succeed");

    let violations = report.violations();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].customer_name, "Alice");
    assert_eq!(violations[0].credit_limit.to_string(), "1000.00");
    assert_eq!(violations[0].overage.to_string(), "200.00");

    let text = report.to_string();
    assert!(text.contains("Alice"));
    assert!(text.contains("200.00"));
}

#[test]
fn test_full_is_repeatable() {
    logging::init_test();
    let env = TestEnv::new();
    env.write_customers(&["Alice\t1000.00", "Bob\t50.00"]);
    env.write_orders(&["Alice\t2024-01-01\t1200.00", "Bob\t2024-01-01\t50.00"]);

    let runner = OperationRunner::new(env.config.clone());
    let first = runner.run(Operation::Full).unwrap();
    let second = runner.run(Operation::Full).unwrap();

    assert_eq!(first.violations().len(), 1);
    assert_eq!(second.violations().len(), 1);
    match second {
        OperationReport::Full { cleaned, imported, .. } => {
            assert_eq!(cleaned.customers_deleted, 2);
            assert_eq!(cleaned.orders_deleted, 2);
            assert_eq!(imported.customers_added, 2);
        }
        other => panic!("expected Full report, got {:?}", other),
    }
}

#[test]
fn test_clean_then_check_reports_nothing() {
    logging::init_test();
    let env = TestEnv::new();
    env.write_customers(&["Alice\t1.00"]);
    env.write_orders(&["Alice\t2024-01-01\t100.00"]);

    let runner = OperationRunner::new(env.config.clone());
    runner.run(Operation::Import).unwrap();
    assert_eq!(runner.check().unwrap().len(), 1);

    runner.run(Operation::Clean).unwrap();
    let report = runner.run(Operation::Check).unwrap();
    assert!(report.violations().is_empty());
}

#[test]
fn test_clean_twice_same_end_state() {
    logging::init_test();
    let env = TestEnv::new();
    env.write_customers(&["Alice\t1.00", "Bob\t2.00"]);
    env.write_orders(&["Bob\t2024-01-01\t1.00"]);

    let runner = OperationRunner::new(env.config.clone());
    runner.import().unwrap();

    let first = runner.clean().unwrap();
    let second = runner.clean().unwrap();

    assert_eq!(first.customers_deleted, 2);
    assert_eq!(first.orders_deleted, 1);
    assert_eq!(second.customers_deleted, 0);
    assert_eq!(second.orders_deleted, 0);

    let store = env.open_store();
    assert_eq!(store.customers().count().unwrap(), 0);
    assert_eq!(store.orders().count().unwrap(), 0);
}

#[test]
fn test_check_boundary_and_ordering() {
    logging::init_test();
    let env = TestEnv::new();
    env.write_customers(&[
        "Exact\t100.00",
        "Over\t100.00",
        "Idle\t100.00",
        "Under\t100.00",
        "AlsoOver\t0.00",
    ]);
    env.write_orders(&[
        "Exact\t2024-01-01\t60.00",
        "Exact\t2024-01-02\t40.00",
        "Over\t2024-01-01\t100.01",
        "Under\t2024-01-01\t99.99",
        "AlsoOver\t2024-01-01\t0.01",
    ]);

    let runner = OperationRunner::new(env.config.clone());
    runner.run(Operation::Import).unwrap();
    let violations = runner.check().unwrap();

    let names: Vec<&str> = violations.iter().map(|v| v.customer_name.as_str()).collect();
    assert_eq!(names, vec!["Over", "AlsoOver"]);
    assert!(violations[0].customer_id < violations[1].customer_id);
    assert_eq!(violations[0].overage.to_string(), "0.01");
}

#[test]
fn test_full_stops_on_import_failure() {
    logging::init_test();
    let env = TestEnv::new();
    env.write_customers(&["Alice\t1000.00"]);
    env.write_orders(&["Carol\t2024-01-01\t1.00"]);

    let runner = OperationRunner::new(env.config.clone());
    let result = runner.run(Operation::Full);

    assert!(matches!(
        result,
        Err(AppError::Import(ImportError::UnknownCustomer { .. }))
    ));

    // clean 已执行，客户批次已提交
    let store = env.open_store();
    let customers = store.customers().find_all().unwrap();
    assert_eq!(customers.len(), 1);
    assert_ne!(customers[0].id, CustomerId(0));
}

#[test]
fn test_unopenable_database_path() {
    logging::init_test();
    let env = TestEnv::new();
    let mut config = env.config.clone();
    config.db_path = env
        .dir
        .path()
        .join("missing_dir")
        .join("orders.db")
        .to_string_lossy()
        .to_string();

    let runner = OperationRunner::new(config);
    assert!(matches!(runner.run(Operation::Check), Err(AppError::Repository(_))));
}

#[test]
fn test_demo_settings_full_run() {
    logging::init_test();
    let env = TestEnv::new();
    let config = order_import::AppConfig::from_file(std::path::Path::new("demos/appsettings.json"))
        .expect("demo settings should load")
        .with_db_path_override(Some(env.config.db_path.clone()));

    let report = OperationRunner::new(config).run(Operation::Full).unwrap();

    let violations = report.violations();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].customer_name, "Alice");
    assert_eq!(violations[0].overage.to_string(), "200.00");
}
