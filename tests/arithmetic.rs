use pretty_assertions::assert_eq;
use sim8086::disassemble;

#[test]
fn accumulator_forms() {
    assert_eq!(disassemble(&[0x04, 0x05]).unwrap(), vec!["add al, 5"]);
    assert_eq!(disassemble(&[0x05, 0x05, 0x00]).unwrap(), vec!["add ax, 5"]);
    let bytes = [
        0x05, 0xE8, 0x03, // add ax, 1000
        0x04, 0xE2, // add al, -30
        0x2D, 0xE8, 0x03, // sub ax, 1000
        0x2C, 0x09, // sub al, 9
        0x3D, 0xE8, 0x03, // cmp ax, 1000
        0x3C, 0xE2, // cmp al, -30
    ];
    let expected = vec!["add ax, 1000", "add al, -30", "sub ax, 1000", "sub al, 9", "cmp ax, 1000", "cmp al, -30"];
    assert_eq!(disassemble(&bytes).unwrap(), expected);
}

#[test]
fn reg_mem_arithmetic() {
    let bytes = [
        0x03, 0x18, // add bx, [bx + si]
        0x03, 0x5E, 0x00, // add bx, [bp]
        0x03, 0x4F, 0x02, // add cx, [bx + 2]
        0x02, 0x7A, 0x04, // add bh, [bp + si + 4]
        0x01, 0x18, // add [bx + si], bx
        0x01, 0xD8, // add ax, bx
        0x00, 0xE0, // add al, ah
        0x2B, 0x18, // sub bx, [bx + si]
        0x29, 0xC3, // sub bx, ax
        0x3B, 0x18, // cmp bx, [bx + si]
        0x38, 0xE0, // cmp al, ah
    ];
    let expected = vec![
        "add bx, [bx + si]",
        "add bx, [bp]",
        "add cx, [bx + 2]",
        "add bh, [bp + si + 4]",
        "add [bx + si], bx",
        "add ax, bx",
        "add al, ah",
        "sub bx, [bx + si]",
        "sub bx, ax",
        "cmp bx, [bx + si]",
        "cmp al, ah",
    ];
    assert_eq!(disassemble(&bytes).unwrap(), expected);
}

#[test]
fn immediate_to_register_or_memory() {
    let bytes = [
        0x83, 0xC6, 0x02, // add si, 2
        0x80, 0x07, 0x22, // add byte [bx], 34
        0x80, 0x40, 0x04, 0x0A, // add byte [bx + si + 4], 10
        0x83, 0x82, 0xE8, 0x03, 0x1D, // add word [bp + si + 1000], 29
        0x81, 0x07, 0xE8, 0x03, // add word [bx], 1000
        0x80, 0x2F, 0x22, // sub byte [bx], 34
        0x83, 0x29, 0x1D, // sub word [bx + di], 29
        0x83, 0xFE, 0x02, // cmp si, 2
        0x83, 0x3E, 0xE2, 0x12, 0x1D, // cmp word [4834], 29
        0x81, 0xC1, 0x00, 0x01, // add cx, 256
    ];
    let expected = vec![
        "add si, 2",
        "add byte [bx], 34",
        "add byte [bx + si + 4], 10",
        "add word [bp + si + 1000], 29",
        "add word [bx], 1000",
        "sub byte [bx], 34",
        "sub word [bx + di], 29",
        "cmp si, 2",
        "cmp word [4834], 29",
        "add cx, 256",
    ];
    assert_eq!(disassemble(&bytes).unwrap(), expected);
}

#[test]
fn sign_extended_immediates() {
    // s=1 w=1: one data byte widened to a word
    assert_eq!(disassemble(&[0x83, 0xC1, 0xFF]).unwrap(), vec!["add cx, -1"]);
    // s=0 w=1: full word
    assert_eq!(disassemble(&[0x81, 0xC1, 0xFF, 0xFF]).unwrap(), vec!["add cx, -1"]);
    assert_eq!(disassemble(&[0x80, 0xC1, 0x7F]).unwrap(), vec!["add cl, 127"]);
    assert_eq!(disassemble(&[0x80, 0xC1, 0x80]).unwrap(), vec!["add cl, -128"]);
}
