//! Programmable transaction encoding
//!
//! Serde mirrors of the Sui `TransactionData::V1` layout, encoded with BCS.
//! Only what this tool sends is modelled: pure and shared-object inputs,
//! `SplitCoins` off the gas coin and one `MoveCall` command. Enum variant
//! order is the wire tag, so unused variants stay as placeholders.

use std::collections::HashMap;

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use serde::Serialize;

use super::types::{CallArg, MoveCall, ObjectId, SuiAddress, ADDRESS_LENGTH};
use crate::error::{Error, Result};

type Blake2b256 = Blake2b<U32>;

/// Domain separator Sui prepends when hashing transaction data into a digest
const TRANSACTION_DATA_SALT: &[u8] = b"TransactionData::";

/// Hash arbitrary byte slices with blake2b-256
pub fn blake2b256(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Base58 transaction digest of encoded transaction data
pub fn transaction_digest(tx_bytes: &[u8]) -> String {
    bs58::encode(blake2b256(&[TRANSACTION_DATA_SALT, tx_bytes])).into_string()
}

/// Reference to an owned coin used for gas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GasCoinRef {
    pub object_id: ObjectId,
    pub version: u64,
    pub digest: [u8; 32],
}

/// Gas settings for one transaction
#[derive(Debug, Clone)]
pub struct GasParams {
    pub owner: SuiAddress,
    pub payment: Vec<GasCoinRef>,
    pub price: u64,
    pub budget: u64,
}

type Address = [u8; ADDRESS_LENGTH];

/// `(id, version, digest)`; the digest is length-prefixed on the wire
type ObjectRef = (Address, u64, Vec<u8>);

#[derive(Serialize)]
enum TransactionData {
    V1(TransactionDataV1),
}

#[derive(Serialize)]
struct TransactionDataV1 {
    kind: TransactionKind,
    sender: Address,
    gas_data: GasData,
    expiration: TransactionExpiration,
}

#[derive(Serialize)]
enum TransactionKind {
    ProgrammableTransaction(ProgrammableTransaction),
}

#[derive(Serialize)]
struct ProgrammableTransaction {
    inputs: Vec<Input>,
    commands: Vec<Command>,
}

#[derive(Serialize)]
enum Input {
    Pure(Vec<u8>),
    Object(ObjectArg),
}

#[derive(Serialize)]
#[allow(dead_code)]
enum ObjectArg {
    ImmOrOwnedObject(ObjectRef),
    SharedObject {
        id: Address,
        initial_shared_version: u64,
        mutable: bool,
    },
}

#[derive(Serialize)]
#[allow(dead_code)]
enum Command {
    MoveCall(Box<ProgrammableMoveCall>),
    TransferObjects(Vec<Argument>, Argument),
    SplitCoins(Argument, Vec<Argument>),
}

#[derive(Serialize)]
struct ProgrammableMoveCall {
    package: Address,
    module: String,
    function: String,
    type_arguments: Vec<TypeTag>,
    arguments: Vec<Argument>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(dead_code)]
enum Argument {
    GasCoin,
    Input(u16),
    Result(u16),
    NestedResult(u16, u16),
}

#[derive(Serialize)]
#[allow(dead_code)]
enum TypeTag {
    Bool,
    U8,
    U64,
    U128,
    Address,
    Signer,
    Vector(Box<TypeTag>),
    Struct(Box<StructTag>),
}

/// Struct type tag parsed from `address::module::Name`
#[derive(Serialize)]
struct StructTag {
    address: Address,
    module: String,
    name: String,
    type_params: Vec<TypeTag>,
}

#[derive(Serialize)]
struct GasData {
    payment: Vec<ObjectRef>,
    owner: Address,
    price: u64,
    budget: u64,
}

#[derive(Serialize)]
#[allow(dead_code)]
enum TransactionExpiration {
    None,
    Epoch(u64),
}

fn to_bcs<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    bcs::to_bytes(value).map_err(|e| Error::Serialization(format!("BCS encoding failed: {}", e)))
}

/// Little-endian `u256` encoding of a value that fits in 128 bits
fn u256_bytes(value: u128) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[..16].copy_from_slice(&value.to_le_bytes());
    out
}

/// Pure-value bytes for a call argument, or `None` for non-pure arguments
fn pure_bytes(arg: &CallArg) -> Result<Option<Vec<u8>>> {
    let bytes = match arg {
        CallArg::U256(v) => to_bcs(&u256_bytes(*v))?,
        CallArg::Address(addr) => to_bcs(&addr.0)?,
        CallArg::U256Vector(values) => {
            let values: Vec<[u8; 32]> = values.iter().map(|v| u256_bytes(*v)).collect();
            to_bcs(&values)?
        }
        CallArg::SplitGas(amount) => to_bcs(amount)?,
        CallArg::SharedObject(_) => return Ok(None),
    };
    Ok(Some(bytes))
}

fn parse_struct_tag(s: &str) -> Result<StructTag> {
    if s.contains('<') {
        return Err(Error::TransactionBuild(format!(
            "Generic type arguments are not supported: {}",
            s
        )));
    }

    let parts: Vec<&str> = s.split("::").collect();
    if parts.len() != 3 || parts[1].is_empty() || parts[2].is_empty() {
        return Err(Error::TransactionBuild(format!("Invalid type tag: {}", s)));
    }

    let address: SuiAddress = parts[0]
        .parse()
        .map_err(|e| Error::TransactionBuild(format!("Invalid type tag {}: {}", s, e)))?;

    Ok(StructTag {
        address: address.0,
        module: parts[1].to_string(),
        name: parts[2].to_string(),
        type_params: vec![],
    })
}

fn index_u16(i: usize, what: &str) -> Result<u16> {
    u16::try_from(i).map_err(|_| Error::TransactionBuild(format!("Too many {}", what)))
}

/// Encode a single Move call as `TransactionData` bytes
///
/// `shared_versions` must contain the initial shared version of every
/// shared object the call references.
pub fn encode_move_call(
    call: &MoveCall,
    sender: SuiAddress,
    shared_versions: &HashMap<ObjectId, u64>,
    gas: &GasParams,
) -> Result<Vec<u8>> {
    if gas.payment.is_empty() {
        return Err(Error::TransactionBuild("No gas coins available".to_string()));
    }

    let mut inputs: Vec<Input> = Vec::new();
    let mut commands: Vec<Command> = Vec::new();
    let mut move_args: Vec<Argument> = Vec::with_capacity(call.arguments.len());

    for arg in &call.arguments {
        let input_index = index_u16(inputs.len(), "inputs")?;

        match arg {
            CallArg::SharedObject(id) => {
                let version = shared_versions.get(id).ok_or_else(|| {
                    Error::TransactionBuild(format!("Unknown shared object version for {}", id))
                })?;
                inputs.push(Input::Object(ObjectArg::SharedObject {
                    id: id.0,
                    initial_shared_version: *version,
                    mutable: true,
                }));
                move_args.push(Argument::Input(input_index));
            }
            CallArg::SplitGas(_) => {
                inputs.push(Input::Pure(pure_bytes(arg)?.unwrap_or_default()));

                let command_index = index_u16(commands.len(), "commands")?;
                commands.push(Command::SplitCoins(
                    Argument::GasCoin,
                    vec![Argument::Input(input_index)],
                ));
                move_args.push(Argument::NestedResult(command_index, 0));
            }
            _ => {
                inputs.push(Input::Pure(pure_bytes(arg)?.unwrap_or_default()));
                move_args.push(Argument::Input(input_index));
            }
        }
    }

    let type_arguments = call
        .type_arguments
        .iter()
        .map(|ty| parse_struct_tag(ty).map(|tag| TypeTag::Struct(Box::new(tag))))
        .collect::<Result<Vec<_>>>()?;

    commands.push(Command::MoveCall(Box::new(ProgrammableMoveCall {
        package: call.target.package.0,
        module: call.target.module.clone(),
        function: call.target.function.clone(),
        type_arguments,
        arguments: move_args,
    })));

    let data = TransactionData::V1(TransactionDataV1 {
        kind: TransactionKind::ProgrammableTransaction(ProgrammableTransaction { inputs, commands }),
        sender: sender.0,
        gas_data: GasData {
            payment: gas
                .payment
                .iter()
                .map(|coin| (coin.object_id.0, coin.version, coin.digest.to_vec()))
                .collect(),
            owner: gas.owner.0,
            price: gas.price,
            budget: gas.budget,
        },
        expiration: TransactionExpiration::None,
    });

    to_bcs(&data)
}
