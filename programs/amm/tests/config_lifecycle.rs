//! Config lifecycle against the real runtime: initialization bounds, the
//! one-shot guarantee, and authority gating on updates.

use anchor_lang::{AccountDeserialize, InstructionData, ToAccountMetas};
use solana_program_test::{processor, BanksClient, ProgramTest};
use solana_sdk::{
    hash::Hash,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    system_program, sysvar,
    transaction::Transaction,
};

use riptide_amm::state::AmmConfig;

fn config_pda() -> Pubkey {
    Pubkey::find_program_address(&[b"amm_config"], &riptide_amm::id()).0
}

fn initialize_ix(authority: Pubkey, fee_destination: Pubkey, fee_rate: u32, protocol_fee_rate: u32) -> Instruction {
    Instruction {
        program_id: riptide_amm::id(),
        accounts: riptide_amm::accounts::InitializeAmm {
            amm_config: config_pda(),
            authority,
            protocol_fee_destination: fee_destination,
            system_program: system_program::ID,
            rent: sysvar::rent::ID,
        }
        .to_account_metas(None),
        data: riptide_amm::instruction::InitializeAmm {
            fee_rate,
            protocol_fee_rate,
        }
        .data(),
    }
}

fn update_ix(authority: Pubkey, new_fee_rate: Option<u32>, swap_enabled: Option<bool>) -> Instruction {
    Instruction {
        program_id: riptide_amm::id(),
        accounts: riptide_amm::accounts::UpdateAmmConfig {
            amm_config: config_pda(),
            authority,
        }
        .to_account_metas(None),
        data: riptide_amm::instruction::UpdateAmmConfig {
            new_fee_rate,
            new_protocol_fee_rate: None,
            create_pool_enabled: None,
            swap_enabled,
        }
        .data(),
    }
}

/// Reinterprets anchor's generated `entry` as program-test's
/// `ProcessInstruction` pointer.
///
/// Anchor 0.31's `entry` ties the account-slice lifetime to the `AccountInfo`
/// lifetime (`&'info [AccountInfo<'info>]`), while `ProcessInstruction` is a
/// higher-ranked fn pointer whose lifetimes are independent. Because
/// `AccountInfo` is invariant the fn item cannot coerce, but the machine ABI is
/// identical and the runtime always invokes with a single concrete lifetime, so
/// reinterpreting the pointer is sound.
const ENTRY: anchor_lang::solana_program::entrypoint::ProcessInstruction = unsafe {
    core::mem::transmute::<
        for<'info> fn(
            &anchor_lang::prelude::Pubkey,
            &'info [anchor_lang::prelude::AccountInfo<'info>],
            &[u8],
        ) -> anchor_lang::solana_program::entrypoint::ProgramResult,
        anchor_lang::solana_program::entrypoint::ProcessInstruction,
    >(riptide_amm::entry)
};

async fn start() -> (BanksClient, Keypair, Hash) {
    let pt = ProgramTest::new("riptide_amm", riptide_amm::id(), processor!(ENTRY));
    pt.start().await
}

async fn send(
    banks_client: &mut BanksClient,
    payer: &Keypair,
    recent_blockhash: Hash,
    instruction: Instruction,
    extra_signers: &[&Keypair],
) -> Result<(), solana_program_test::BanksClientError> {
    let mut signers = vec![payer];
    signers.extend_from_slice(extra_signers);
    let tx = Transaction::new_signed_with_payer(
        &[instruction],
        Some(&payer.pubkey()),
        &signers,
        recent_blockhash,
    );
    banks_client.process_transaction(tx).await
}

#[tokio::test]
async fn initialize_once_then_update() {
    let (mut banks_client, payer, recent_blockhash) = start().await;
    let fee_destination = Pubkey::new_unique();

    send(
        &mut banks_client,
        &payer,
        recent_blockhash,
        initialize_ix(payer.pubkey(), fee_destination, 3000, 2000),
        &[],
    )
    .await
    .unwrap();

    let account = banks_client
        .get_account(config_pda())
        .await
        .unwrap()
        .expect("config account exists");
    let config = AmmConfig::try_deserialize(&mut account.data.as_ref()).unwrap();
    assert_eq!(config.authority, payer.pubkey());
    assert_eq!(config.protocol_fee_destination, fee_destination);
    assert_eq!(config.fee_rate, 3000);
    assert_eq!(config.protocol_fee_rate, 2000);
    assert!(config.create_pool_enabled);
    assert!(config.swap_enabled);

    // The authority can retune rates and flip the kill switch.
    send(
        &mut banks_client,
        &payer,
        recent_blockhash,
        update_ix(payer.pubkey(), Some(500), Some(false)),
        &[],
    )
    .await
    .unwrap();

    let account = banks_client
        .get_account(config_pda())
        .await
        .unwrap()
        .unwrap();
    let config = AmmConfig::try_deserialize(&mut account.data.as_ref()).unwrap();
    assert_eq!(config.fee_rate, 500);
    assert!(!config.swap_enabled);
}

#[tokio::test]
async fn second_initialization_fails() {
    let (mut banks_client, payer, recent_blockhash) = start().await;
    let fee_destination = Pubkey::new_unique();

    send(
        &mut banks_client,
        &payer,
        recent_blockhash,
        initialize_ix(payer.pubkey(), fee_destination, 3000, 2000),
        &[],
    )
    .await
    .unwrap();

    let blockhash = banks_client.get_latest_blockhash().await.unwrap();
    let result = send(
        &mut banks_client,
        &payer,
        blockhash,
        initialize_ix(payer.pubkey(), Pubkey::new_unique(), 100, 0),
        &[],
    )
    .await;
    assert!(result.is_err());

    // The original parameters survive.
    let account = banks_client
        .get_account(config_pda())
        .await
        .unwrap()
        .unwrap();
    let config = AmmConfig::try_deserialize(&mut account.data.as_ref()).unwrap();
    assert_eq!(config.fee_rate, 3000);
    assert_eq!(config.protocol_fee_destination, fee_destination);
}

#[tokio::test]
async fn fee_rate_bounds_are_enforced() {
    let (mut banks_client, payer, recent_blockhash) = start().await;
    let destination = Pubkey::new_unique();

    // One past the ceiling
    assert!(send(
        &mut banks_client,
        &payer,
        recent_blockhash,
        initialize_ix(payer.pubkey(), destination, 10_001, 0),
        &[],
    )
    .await
    .is_err());

    // Zero is not a valid trading fee either
    let blockhash = banks_client.get_latest_blockhash().await.unwrap();
    assert!(send(
        &mut banks_client,
        &payer,
        blockhash,
        initialize_ix(payer.pubkey(), destination, 0, 0),
        &[],
    )
    .await
    .is_err());

    // The ceiling itself is valid
    let blockhash = banks_client.get_latest_blockhash().await.unwrap();
    send(
        &mut banks_client,
        &payer,
        blockhash,
        initialize_ix(payer.pubkey(), destination, 10_000, 10_000),
        &[],
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn update_requires_the_configured_authority() {
    let (mut banks_client, payer, recent_blockhash) = start().await;

    send(
        &mut banks_client,
        &payer,
        recent_blockhash,
        initialize_ix(payer.pubkey(), Pubkey::new_unique(), 3000, 2000),
        &[],
    )
    .await
    .unwrap();

    let intruder = Keypair::new();
    let instruction = update_ix(intruder.pubkey(), Some(1), None);
    let blockhash = banks_client.get_latest_blockhash().await.unwrap();
    let result = send(
        &mut banks_client,
        &payer,
        blockhash,
        instruction,
        &[&intruder],
    )
    .await;
    assert!(result.is_err());
}
