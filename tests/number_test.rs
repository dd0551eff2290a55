mod common;
use common::{assert_debug, exec};

/// Debug line for a machine with every slot active.
fn machine(vals: [&str; 8]) -> String {
    let mut s = String::new();
    for v in &vals {
        s.push_str("{* ");
        s.push_str(v);
        s.push_str(" } ");
    }
    s.pop();
    s.push('\n');
    s
}

#[test]
fn test_add_consuming() {
    assert_debug("~3 4nA", &machine(["7", "", "", "", "", "", "", ""]));
}

#[test]
fn test_add_keeping_operands() {
    assert_debug("~3 4na", &machine(["3", "4", "7", "", "", "", "", ""]));
}

#[test]
fn test_divide() {
    assert_debug("~5 2nD", &machine(["2.5", "", "", "", "", "", "", ""]));
}

#[test]
fn test_absolute_value_of_negative() {
    // no negative literals: build -3 as 0-3
    assert_debug("~0 3nSNaB", &machine(["3", "", "", "", "", "", "", ""]));
}

#[test]
fn test_modulo_without_consuming() {
    assert_debug("~7 3NMo", &machine(["7", "3", "1", "", "", "", "", ""]));
}

#[test]
fn test_comparisons() {
    assert_debug("~3 4nl", &machine(["3", "4", "1", "", "", "", "", ""]));
    assert_debug("~3 4ng", &machine(["3", "4", "0", "", "", "", "", ""]));
}

#[test]
fn test_rounding_family() {
    assert_debug("~5 2nDnf", &machine(["2.5", "2", "", "", "", "", "", ""]));
    assert_debug("~5 2nDnc", &machine(["2.5", "3", "", "", "", "", "", ""]));
    assert_debug("~5 2nDNRo", &machine(["2.5", "3", "", "", "", "", "", ""]));
    assert_debug("~7NiN", &machine(["8", "", "", "", "", "", "", ""]));
    assert_debug("~7NdE", &machine(["6", "", "", "", "", "", "", ""]));
}

#[test]
fn test_bitwise() {
    assert_debug("~6 3NbO", &machine(["7", "", "", "", "", "", "", ""]));
    assert_debug("~6 3NbA", &machine(["2", "", "", "", "", "", "", ""]));
    assert_debug("~6 3NbX", &machine(["5", "", "", "", "", "", "", ""]));
    assert_debug("~0NbN", &machine(["-1", "", "", "", "", "", "", ""]));
}

#[test]
fn test_range_ascending_and_descending() {
    assert_debug("~1 5nR", &machine(["[1 2 3 4]", "", "", "", "", "", "", ""]));
    assert_debug("~3 0nR", &machine(["[3 2 1]", "", "", "", "", "", "", ""]));
    assert_debug("~2 2nR", &machine(["[]", "", "", "", "", "", "", ""]));
}

#[test]
fn test_power() {
    assert_debug("~2 10nP", &machine(["1024", "", "", "", "", "", "", ""]));
}

#[test]
fn test_to_base_prints_digits() {
    let (_, out) = exec("(10 2nBsP");
    assert_eq!(out, "1010");
    let (_, out) = exec("(255 16nBsP");
    assert_eq!(out, "ff");
}

#[test]
fn test_from_base() {
    let (_, out) = exec("(\"ff\"16sBtSsP");
    assert_eq!(out, "255");
    let (_, out) = exec("(\"-11.1\"2sBtSsP");
    assert_eq!(out, "-3.5");
}

#[test]
fn test_to_base_rejects_zero_base() {
    let (runtime, _) = exec("~10 0nB");
    assert_eq!(runtime.errors().len(), 1);
    assert!(!runtime.errors()[0].is_fatal());
}

#[test]
fn test_number_literal_out_of_range_recovers_with_zero() {
    let (runtime, _) = exec("~99999999999");
    assert_eq!(runtime.errors().len(), 1);
    assert_eq!(
        runtime.debug(),
        machine(["0", "", "", "", "", "", "", ""])
    );
}
