mod common;
use common::{assert_debug, exec};

/// Debug line for a machine with every slot active and only `a` holding a
/// value.
fn slot_a(val: &str) -> String {
    format!("{{* {} }} {}\n", val, "{*  } {*  } {*  } {*  } {*  } {*  } {*  }")
}

#[test]
fn test_string_literal_is_char_codes() {
    assert_debug("~\"AB\"", &slot_a("[65 66]"));
}

#[test]
fn test_repeat() {
    // [1 2] three times over
    assert_debug("~1 3nR3aR", &slot_a("[1 2 1 2 1 2]"));
    // fractional counts fill a partial copy; 2.5 rides in through a permavar
    assert_debug(
        "~5 2nD*1 3nR#aR",
        "{* [1 2 1 2 1] } {*  } {*  } {*  } {*  } {*  } {*  } {*  } +=2.5\n",
    );
    assert_debug("~1 3nR0aR", &slot_a("[]"));
}

#[test]
fn test_length() {
    assert_debug("~\"\"aL", &slot_a("0"));
    assert_debug("~\"abc\"aL", &slot_a("3"));
}

#[test]
fn test_concat() {
    assert_debug("~\"ab\"\"cd\"aC", &slot_a("[97 98 99 100]"));
}

#[test]
fn test_set_operations() {
    assert_debug("~\"ab\"\"bc\"aD", &slot_a("[97]"));
    assert_debug("~\"aab\"\"bc\"AoR", &slot_a("[97 98 99]"));
    assert_debug("~\"ab\"\"cb\"AaN", &slot_a("[98]"));
}

#[test]
fn test_element_at_index() {
    assert_debug("~\"AB\"1aA", &slot_a("66"));
    // out of range falls back to zero
    assert_debug("~\"AB\"5aA", &slot_a("0"));
}

#[test]
fn test_split_and_join() {
    assert_debug("~\"a,b,c\"\",\"aS", &slot_a("[[97] [98] [99]]"));
    assert_debug("~\"ab\"\", \"aJ", &slot_a("[97 44 32 98]"));
}

#[test]
fn test_group_and_zip() {
    assert_debug("~\"abcd\"2aG", &slot_a("[[97 98] [99 100]]"));
    assert_debug("~\"abcd\"2aGaZ", &slot_a("[[97 99] [98 100]]"));
    // ragged rows pad by omission
    assert_debug("~\"abc\"2aGaZ", &slot_a("[[97 99] [98]]"));
}

#[test]
fn test_zip_rejects_flat_elements() {
    let (runtime, _) = exec("~\"ab\"aZ");
    assert_eq!(runtime.errors().len(), 1);
    assert!(!runtime.errors()[0].is_fatal());
}

#[test]
fn test_flatten() {
    assert_debug("~\"abcd\"2aG1AfL", &slot_a("[97 98 99 100]"));
    // zero layers means all of them
    assert_debug("~\"abcd\"2aG1aG0AfL", &slot_a("[97 98 99 100]"));
}

#[test]
fn test_splice() {
    assert_debug("~\"abcd\"1 2\"xy\"AsP", &slot_a("[97 120 121 100]"));
}

#[test]
fn test_slices() {
    assert_debug("~\"abcd\"2AaL", &slot_a("[97 98]"));
    assert_debug("~\"abcd\"1AaG", &slot_a("[99 100]"));
}

#[test]
fn test_every_nth() {
    assert_debug("~\"abcd\"2aN", &slot_a("[97 99]"));
    // negative step walks backward; -1 is built in f before the array lands in a
    assert_debug(
        "(0 1nS[\"abcd\"aN",
        "{* [100 99 98 97] } {  } {  } {  } {  } {*  } {  } {  }\n",
    );
}

#[test]
fn test_sort() {
    assert_debug("~\"dcba\"AsO", &slot_a("[97 98 99 100]"));
}

#[test]
fn test_sort_by_block() {
    // "is the left greater" sorts descending
    assert_debug("~\"acbd\":nG;AsB", &slot_a("[100 99 98 97]"));
}

#[test]
fn test_map() {
    assert_debug("~\"abc\":1nA;aM", &slot_a("[98 99 100]"));
}

#[test]
fn test_select() {
    assert_debug("~\"abcb\":98eQ;AsE", &slot_a("[98 98]"));
    assert_debug("~\"abcb\":98eQ;AsI", &slot_a("[1 3]"));
}

#[test]
fn test_each_prints() {
    let (_, out) = exec("~\"Hi\":wRsP;aE");
    assert_eq!(out, "Hi");
}

#[test]
fn test_fold_sums() {
    assert_debug("~1 5nR:nA;aF", &slot_a("10"));
    // folding nothing leaves the arbitrary zero
    assert_debug("~\"\":nA;aF", &slot_a("0"));
}

#[test]
fn test_shuffle_keeps_elements() {
    assert_debug("~1 11nRAsHAsO", &slot_a("[1 2 3 4 5 6 7 8 9 10]"));
}

#[test]
fn test_duplicate_and_wrap() {
    assert_debug(
        "~7dU",
        &format!("{{* 7 }} {{* 7 }} {}\n", "{*  } {*  } {*  } {*  } {*  } {*  }"),
    );
    assert_debug("~7wR", &slot_a("[7]"));
}
