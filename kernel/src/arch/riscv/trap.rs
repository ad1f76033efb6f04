//! Trap vector.
//!
//! `trap_entry` saves the caller-saved registers, hands `mcause`, `mtval`
//! and `mepc` to `trap_handler` (defined by the binary), writes the returned
//! address back to `mepc`, and returns with `mret`. Callee-saved registers
//! are preserved by `trap_handler` itself.

/// Bytes of stack `trap_entry` reserves: ra, t0-t6, a0-a7.
pub const TRAP_FRAME_SIZE: usize = 16 * 4;

static_assertions::const_assert_eq!(TRAP_FRAME_SIZE % 16, 0);

extern "C" {
    fn trap_entry();
}

core::arch::global_asm!(
    r#"
    .section .text.trap, "ax"
    .global trap_entry
    .balign 4
trap_entry:
    addi sp, sp, -64
    sw ra,   0(sp)
    sw t0,   4(sp)
    sw t1,   8(sp)
    sw t2,  12(sp)
    sw t3,  16(sp)
    sw t4,  20(sp)
    sw t5,  24(sp)
    sw t6,  28(sp)
    sw a0,  32(sp)
    sw a1,  36(sp)
    sw a2,  40(sp)
    sw a3,  44(sp)
    sw a4,  48(sp)
    sw a5,  52(sp)
    sw a6,  56(sp)
    sw a7,  60(sp)

    csrr a0, mcause
    csrr a1, mtval
    csrr a2, mepc
    call trap_handler
    csrw mepc, a0

    lw ra,   0(sp)
    lw t0,   4(sp)
    lw t1,   8(sp)
    lw t2,  12(sp)
    lw t3,  16(sp)
    lw t4,  20(sp)
    lw t5,  24(sp)
    lw t6,  28(sp)
    lw a0,  32(sp)
    lw a1,  36(sp)
    lw a2,  40(sp)
    lw a3,  44(sp)
    lw a4,  48(sp)
    lw a5,  52(sp)
    lw a6,  56(sp)
    lw a7,  60(sp)
    addi sp, sp, 64
    mret
"#
);

/// Point `mtvec` at `trap_entry` (direct mode).
///
/// # Safety
/// Replaces whatever trap vector was installed.
pub unsafe fn install() {
    super::csr_write!("mtvec", trap_entry as *const () as usize);
}
