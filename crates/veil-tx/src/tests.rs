use alloc::vec::Vec;

use anyhow::Context;
use assert_matches::assert_matches;
use rstest::rstest;
use veil_objects::{
    Digest, EMPTY_WORD, Felt, MAX_OUTPUT_NOTES_PER_TX, NoteError, ONE, TransactionOutputError,
    Word, ZERO,
    account::AccountId,
    asset::{FungibleAsset, NonFungibleAsset, NonFungibleAssetDetails},
    block::BlockNumber,
    note::{NoteExecutionHint, NoteType},
    testing::account_id::{
        ACCOUNT_ID_FUNGIBLE_FAUCET, ACCOUNT_ID_NON_FUNGIBLE_FAUCET, ACCOUNT_ID_SENDER,
    },
};

use crate::{
    TransactionEvent, TransactionInputs, TransactionKernel, TransactionObserver,
    TransactionOutputs,
    errors::{
        TransactionKernelError,
        tx_kernel_errors::{
            ERR_INVALID_TX_EXPIRATION_DELTA, ERR_NOTE_FUNGIBLE_MAX_AMOUNT_EXCEEDED,
            ERR_TX_OUTPUT_NOTES_OVERFLOW,
        },
    },
};

// TEST HELPERS
// ================================================================================================

const BLOCK_NUM: u32 = 100;

fn sender() -> AccountId {
    AccountId::try_from(ACCOUNT_ID_SENDER).unwrap()
}

fn block_hash() -> Digest {
    Digest::from([Felt::new(1), Felt::new(2), Felt::new(3), Felt::new(4)])
}

fn inputs() -> TransactionInputs {
    TransactionInputs::new(sender(), BlockNumber::from(BLOCK_NUM), block_hash())
}

fn kernel() -> TransactionKernel {
    TransactionKernel::new(inputs())
}

fn recipient(seed: u64) -> Digest {
    Digest::from([Felt::new(seed), Felt::new(seed + 1), Felt::new(seed + 2), Felt::new(seed + 3)])
}

fn fungible_word(amount: u64) -> Word {
    let faucet_id = AccountId::try_from(ACCOUNT_ID_FUNGIBLE_FAUCET).unwrap();
    FungibleAsset::new(faucet_id, amount).unwrap().into()
}

fn non_fungible_word(asset_data: &[u8]) -> Word {
    let faucet_id = AccountId::try_from(ACCOUNT_ID_NON_FUNGIBLE_FAUCET).unwrap();
    let details = NonFungibleAssetDetails::new(faucet_id, asset_data.to_vec()).unwrap();
    NonFungibleAsset::new(&details).unwrap().into()
}

fn create_note(
    kernel: &mut TransactionKernel<impl TransactionObserver>,
    tag: u32,
    note_type: NoteType,
    recipient_seed: u64,
) -> Result<u32, TransactionKernelError> {
    kernel.create_note(
        Felt::from(tag),
        ZERO,
        note_type,
        NoteExecutionHint::always(),
        recipient(recipient_seed),
    )
}

/// Records every event the kernel emits so tests can assert on the emission order.
#[derive(Debug, Default)]
struct RecordingObserver {
    events: Vec<TransactionEvent>,
}

impl TransactionObserver for RecordingObserver {
    fn on_event(&mut self, event: TransactionEvent) {
        self.events.push(event);
    }
}

// NOTE CREATION
// ================================================================================================

#[test]
fn create_note_returns_sequential_indices() {
    let mut kernel = kernel();
    assert_eq!(kernel.block_num(), BlockNumber::from(BLOCK_NUM));
    assert_eq!(kernel.block_hash(), block_hash());

    for i in 0..3u64 {
        let idx = create_note(&mut kernel, 0xc000_0000, NoteType::Private, i).unwrap();
        assert_eq!(idx as u64, i);
    }
    assert_eq!(kernel.num_output_notes(), 3);
}

#[test]
fn created_notes_flow_into_transaction_outputs() -> anyhow::Result<()> {
    let mut kernel = kernel();

    let note_idx = create_note(&mut kernel, 0xc000_0000, NoteType::Private, 1)?;
    assert_eq!(note_idx, 0);

    kernel.add_asset_to_note(0, fungible_word(100))?;
    kernel.add_asset_to_note(0, fungible_word(50))?;

    let outputs: TransactionOutputs = kernel.into_outputs()?;
    assert_eq!(outputs.output_notes.num_notes(), 1);
    assert_eq!(outputs.expiration_block_num, BlockNumber::from(u32::MAX));

    let note = outputs.output_notes.get_note(0);
    assert_eq!(note.metadata().sender(), sender());
    assert_eq!(note.metadata().note_type(), NoteType::Private);
    assert_eq!(note.metadata().execution_hint(), NoteExecutionHint::always());
    assert_eq!(note.metadata().aux(), ZERO);
    assert_eq!(note.recipient_digest(), recipient(1));

    // the two fungible assets come from the same faucet and must merge into one
    assert_eq!(note.assets().num_assets(), 1);
    let asset = note.assets().iter().next().context("note should carry an asset")?;
    assert_eq!(asset.unwrap_fungible().amount(), 150);

    Ok(())
}

#[rstest]
#[case::network_single_target(0x0000_0000)]
#[case::network_use_case(0x4000_0000)]
#[case::local_public_use_case(0x8000_0000)]
fn private_notes_require_local_any_tag_prefix(#[case] tag: u32) {
    let mut kernel = kernel();

    assert_matches!(
        create_note(&mut kernel, tag, NoteType::Private, 1).unwrap_err(),
        TransactionKernelError::InvalidNoteMetadata(NoteError::InconsistentNoteTag(
            NoteType::Private,
            _
        ))
    );
    assert_eq!(kernel.num_output_notes(), 0);

    // the same tag is fine for a public note
    create_note(&mut kernel, tag, NoteType::Public, 1).unwrap();
}

#[test]
fn local_any_tag_prefix_allows_both_note_types() {
    let mut kernel = kernel();
    create_note(&mut kernel, 0xc000_0000, NoteType::Private, 1).unwrap();
    create_note(&mut kernel, 0xc000_0000, NoteType::Public, 2).unwrap();
    assert_eq!(kernel.num_output_notes(), 2);
}

#[test]
fn create_note_rejects_encrypted_notes() {
    let mut kernel = kernel();

    assert_matches!(
        create_note(&mut kernel, 0xc000_0000, NoteType::Encrypted, 1).unwrap_err(),
        TransactionKernelError::InvalidNoteMetadata(NoteError::InvalidNoteType(_))
    );
    assert_eq!(kernel.num_output_notes(), 0);
}

#[test]
fn create_note_rejects_tag_exceeding_u32() {
    let mut kernel = kernel();

    let err = kernel
        .create_note(
            Felt::new(1u64 << 32),
            ONE,
            NoteType::Private,
            NoteExecutionHint::always(),
            recipient(1),
        )
        .unwrap_err();
    assert_matches!(err, TransactionKernelError::NoteTagNotU32(tag) if tag == 1u64 << 32);
}

#[test]
fn create_note_enforces_output_note_limit() {
    let mut kernel = kernel();
    for i in 0..MAX_OUTPUT_NOTES_PER_TX as u64 {
        create_note(&mut kernel, 0xc000_0000, NoteType::Private, i).unwrap();
    }

    let err = create_note(&mut kernel, 0xc000_0000, NoteType::Private, 4096).unwrap_err();
    assert_matches!(
        err,
        TransactionKernelError::TooManyOutputNotes(n) if n == MAX_OUTPUT_NOTES_PER_TX + 1
    );
    assert_eq!(err.error_code(), ERR_TX_OUTPUT_NOTES_OVERFLOW);

    // the failed call must not have grown the note list
    assert_eq!(kernel.num_output_notes(), MAX_OUTPUT_NOTES_PER_TX);
}

// ASSET ACCUMULATION
// ================================================================================================

#[test]
fn add_asset_rejects_malformed_asset_words() {
    let mut kernel = kernel();
    create_note(&mut kernel, 0xc000_0000, NoteType::Private, 1).unwrap();

    // an all-zero word carries no valid faucet ID in its issuer element
    assert_matches!(
        kernel.add_asset_to_note(0, EMPTY_WORD).unwrap_err(),
        TransactionKernelError::MalformedAsset(_)
    );

    let outputs = kernel.into_outputs().unwrap();
    assert!(outputs.output_notes.get_note(0).assets().is_empty());
}

#[test]
fn add_asset_rejects_duplicate_non_fungible_assets() {
    let mut kernel = kernel();
    create_note(&mut kernel, 0xc000_0000, NoteType::Private, 1).unwrap();

    let asset = non_fungible_word(&[1, 2, 3]);
    kernel.add_asset_to_note(0, asset).unwrap();

    assert_matches!(
        kernel.add_asset_to_note(0, asset).unwrap_err(),
        TransactionKernelError::AddAssetFailed {
            note_idx: 0,
            source: NoteError::DuplicateNonFungibleAsset(_),
        }
    );

    let outputs = kernel.into_outputs().unwrap();
    assert_eq!(outputs.output_notes.get_note(0).assets().num_assets(), 1);
}

#[test]
fn add_asset_rejects_fungible_amount_overflow() {
    let mut kernel = kernel();
    create_note(&mut kernel, 0xc000_0000, NoteType::Private, 1).unwrap();

    kernel.add_asset_to_note(0, fungible_word(FungibleAsset::MAX_AMOUNT)).unwrap();

    let err = kernel.add_asset_to_note(0, fungible_word(1)).unwrap_err();
    assert_matches!(
        err,
        TransactionKernelError::AddAssetFailed {
            note_idx: 0,
            source: NoteError::AddFungibleAssetBalanceError(_),
        }
    );
    assert_eq!(err.error_code(), ERR_NOTE_FUNGIBLE_MAX_AMOUNT_EXCEEDED);

    // the failed merge must leave the note balance unchanged
    let outputs = kernel.into_outputs().unwrap();
    let note = outputs.output_notes.get_note(0);
    assert_eq!(note.assets().num_assets(), 1);
    let asset = note.assets().iter().next().unwrap();
    assert_eq!(asset.unwrap_fungible().amount(), FungibleAsset::MAX_AMOUNT);
}

#[test]
fn add_asset_stages_assets_for_the_next_created_note() {
    let mut kernel = kernel();

    // index 0 does not exist yet, so the asset is staged for the first note
    kernel.add_asset_to_note(0, fungible_word(25)).unwrap();
    assert_eq!(kernel.num_output_notes(), 0);

    create_note(&mut kernel, 0xc000_0000, NoteType::Private, 1).unwrap();

    // the same applies one note ahead of the current count
    kernel.add_asset_to_note(1, non_fungible_word(&[7, 8, 9])).unwrap();
    create_note(&mut kernel, 0xc000_0000, NoteType::Private, 2).unwrap();

    let outputs = kernel.into_outputs().unwrap();
    let note0 = outputs.output_notes.get_note(0);
    assert_eq!(note0.assets().num_assets(), 1);
    assert_eq!(note0.assets().iter().next().unwrap().unwrap_fungible().amount(), 25);

    let note1 = outputs.output_notes.get_note(1);
    assert_eq!(note1.assets().num_assets(), 1);
    assert!(note1.assets().iter().next().unwrap().is_non_fungible());
}

#[test]
fn add_asset_rejects_index_beyond_the_next_note() {
    let mut kernel = kernel();

    assert_matches!(
        kernel.add_asset_to_note(1, fungible_word(10)).unwrap_err(),
        TransactionKernelError::InvalidNoteIndex(1)
    );

    create_note(&mut kernel, 0xc000_0000, NoteType::Private, 1).unwrap();
    assert_matches!(
        kernel.add_asset_to_note(3, fungible_word(10)).unwrap_err(),
        TransactionKernelError::InvalidNoteIndex(3)
    );
}

#[test]
fn staged_assets_are_dropped_if_no_note_claims_them() {
    let mut kernel = kernel();
    create_note(&mut kernel, 0xc000_0000, NoteType::Private, 1).unwrap();

    // stage an asset for a second note which is never created
    kernel.add_asset_to_note(1, fungible_word(10)).unwrap();

    let outputs = kernel.into_outputs().unwrap();
    assert_eq!(outputs.output_notes.num_notes(), 1);
    assert!(outputs.output_notes.get_note(0).assets().is_empty());
}

// TRANSACTION EXPIRATION
// ================================================================================================

#[test]
fn transaction_expiration_only_moves_earlier() {
    let mut kernel = kernel();
    assert_eq!(kernel.get_expiration_delta(), 0);

    kernel.update_expiration_block_num(Felt::new(500)).unwrap();
    assert_eq!(kernel.get_expiration_delta(), 500);

    // a later expiration must not replace an earlier one
    kernel.update_expiration_block_num(Felt::new(1000)).unwrap();
    assert_eq!(kernel.get_expiration_delta(), 500);

    kernel.update_expiration_block_num(Felt::new(100)).unwrap();
    assert_eq!(kernel.get_expiration_delta(), 100);

    let outputs = kernel.into_outputs().unwrap();
    assert_eq!(outputs.expiration_block_num, BlockNumber::from(BLOCK_NUM) + 100);
}

#[rstest]
#[case::zero(0)]
#[case::one_above_u16_max(u16::MAX as u64 + 1)]
#[case::u32_max(u32::MAX as u64)]
fn transaction_expiration_rejects_out_of_range_deltas(#[case] delta: u64) {
    let mut kernel = kernel();

    let err = kernel.update_expiration_block_num(Felt::new(delta)).unwrap_err();
    assert_matches!(err, TransactionKernelError::InvalidExpirationDelta(d) if d == delta);
    assert_eq!(err.error_code(), ERR_INVALID_TX_EXPIRATION_DELTA);

    // a rejected delta must leave the expiration unset
    assert_eq!(kernel.get_expiration_delta(), 0);
}

#[test]
fn transaction_expiration_accepts_boundary_deltas() {
    let mut kernel = kernel();

    kernel.update_expiration_block_num(Felt::new(u16::MAX as u64)).unwrap();
    assert_eq!(kernel.get_expiration_delta(), u16::MAX as u32);

    kernel.update_expiration_block_num(Felt::new(1)).unwrap();
    assert_eq!(kernel.get_expiration_delta(), 1);
}

// FINALIZATION
// ================================================================================================

#[test]
fn into_outputs_rejects_duplicate_note_ids() {
    let mut kernel = kernel();

    // same recipient and same (empty) assets reduce to the same note ID
    create_note(&mut kernel, 0xc000_0000, NoteType::Private, 1).unwrap();
    create_note(&mut kernel, 0xc000_0000, NoteType::Private, 1).unwrap();

    assert_matches!(
        kernel.into_outputs().unwrap_err(),
        TransactionOutputError::DuplicateOutputNote(_)
    );
}

// OBSERVER
// ================================================================================================

#[test]
fn observer_receives_note_lifecycle_events() {
    let mut kernel = TransactionKernel::with_observer(inputs(), RecordingObserver::default());

    create_note(&mut kernel, 0xc000_0000, NoteType::Private, 1).unwrap();
    kernel.add_asset_to_note(0, fungible_word(10)).unwrap();

    assert_eq!(
        kernel.observer().events,
        vec![
            TransactionEvent::NoteBeforeCreated,
            TransactionEvent::NoteAfterCreated,
            TransactionEvent::NoteBeforeAddAsset,
            TransactionEvent::NoteAfterAddAsset,
        ]
    );
}

#[test]
fn observer_events_stop_at_the_failed_check() {
    let mut kernel = TransactionKernel::with_observer(inputs(), RecordingObserver::default());

    // metadata validation fails after the before-create event was emitted
    create_note(&mut kernel, 0x0000_0000, NoteType::Private, 1).unwrap_err();
    assert_eq!(kernel.observer().events, vec![TransactionEvent::NoteBeforeCreated]);

    // malformed asset words and invalid indices are rejected before any add-asset event
    create_note(&mut kernel, 0xc000_0000, NoteType::Private, 1).unwrap();
    let num_events = kernel.observer().events.len();
    kernel.add_asset_to_note(0, EMPTY_WORD).unwrap_err();
    kernel.add_asset_to_note(5, fungible_word(10)).unwrap_err();
    assert_eq!(kernel.observer().events.len(), num_events);
}
